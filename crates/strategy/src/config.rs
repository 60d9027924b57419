use serde::{Deserialize, Serialize};

/// Top-level instrument config file (TOML).
///
/// Example `config/instruments.toml`:
/// ```toml
/// [[instrument]]
/// symbol = "EUR_USD"
/// stop_loss_distance = 0.0005
/// take_profit_distance = 0.0015
/// units = 100
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentsFileConfig {
    #[serde(rename = "instrument")]
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentConfig {
    /// OANDA instrument name, e.g. "EUR_USD".
    pub symbol: String,
    /// Stop-loss distance from entry, in price units of the instrument.
    pub stop_loss_distance: f64,
    /// Take-profit distance from entry, in price units of the instrument.
    pub take_profit_distance: f64,
    /// Fixed order size; the signal direction decides the sign.
    pub units: u32,
}

impl InstrumentsFileConfig {
    /// Load from a TOML file. Exits process on error; a bad instrument
    /// config must never reach the trading loop.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("Failed to read instrument config at '{path}': {e}")
        });
        let config: Self = toml::from_str(&content).unwrap_or_else(|e| {
            panic!("Failed to parse instrument config at '{path}': {e}")
        });
        config.validate();
        config
    }

    fn validate(&self) {
        if self.instruments.is_empty() {
            panic!("Instrument config must list at least one instrument");
        }
        for inst in &self.instruments {
            if inst.stop_loss_distance <= 0.0 {
                panic!(
                    "Instrument '{}': stop_loss_distance must be positive",
                    inst.symbol
                );
            }
            if inst.take_profit_distance <= 0.0 {
                panic!(
                    "Instrument '{}': take_profit_distance must be positive",
                    inst.symbol
                );
            }
            if inst.units == 0 {
                panic!("Instrument '{}': units must be at least 1", inst.symbol);
            }
        }
    }
}
