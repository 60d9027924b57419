use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{BrokerGateway, Config};
use engine::{OandaClient, Runner, SystemClock};
use strategy::InstrumentsFileConfig;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(environment = %cfg.environment, "Rangebot starting");

    let instruments_file = InstrumentsFileConfig::load(&cfg.instruments_config_path);
    for inst in &instruments_file.instruments {
        info!(
            instrument = %inst.symbol,
            stop_loss = inst.stop_loss_distance,
            take_profit = inst.take_profit_distance,
            units = inst.units,
            "Loaded instrument"
        );
    }

    // ── Broker gateway ────────────────────────────────────────────────────────
    let gateway: Arc<dyn BrokerGateway> = Arc::new(OandaClient::new(
        &cfg.oanda_api_key,
        &cfg.oanda_account_id,
        cfg.environment,
    ));

    let account_id = gateway.verify_connectivity().await.unwrap_or_else(|e| {
        panic!("FATAL: Failed to connect to OANDA. Check API key and account ID: {e}")
    });
    info!(account = %account_id, "Connected to OANDA");

    // ── Runner ────────────────────────────────────────────────────────────────
    let runner = Runner::new(gateway, Arc::new(SystemClock), instruments_file.instruments);
    tokio::spawn(runner.run());

    info!("Runner started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}
