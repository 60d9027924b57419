use crate::Environment;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // OANDA credentials
    pub oanda_api_key: String,
    pub oanda_account_id: String,
    pub environment: Environment,

    // Instrument config file path
    pub instruments_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        // Defaults to the practice host; going live is an explicit opt-in.
        let environment = match optional_env("OANDA_ENVIRONMENT")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("practice") => Environment::Practice,
            Some("live") => Environment::Live,
            Some(other) => panic!(
                "ERROR: OANDA_ENVIRONMENT must be 'practice' or 'live', got: '{other}'"
            ),
        };

        Config {
            oanda_api_key: required_env("OANDA_API_KEY"),
            oanda_account_id: required_env("OANDA_ACCOUNT_ID"),
            environment,
            instruments_config_path: optional_env("INSTRUMENTS_CONFIG_PATH")
                .unwrap_or_else(|| "config/instruments.toml".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
