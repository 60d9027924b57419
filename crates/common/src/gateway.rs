use async_trait::async_trait;

use crate::{Bar, BracketOrder, Granularity, Result};

/// Abstraction over the brokerage connection.
///
/// `OandaClient` in `crates/engine` implements this for the real v20 REST
/// API; tests substitute an in-memory double. Only the `Runner` drives it
/// once the startup connectivity check has passed.
#[async_trait]
pub trait BrokerGateway: Send + Sync {
    /// Confirm credentials and reachability. Returns the account identifier.
    /// Called once at startup; any failure is fatal.
    async fn verify_connectivity(&self) -> Result<String>;

    /// Fetch the most recent `count` completed bars for an instrument,
    /// oldest first. Bars still forming are never included.
    async fn fetch_recent_bars(
        &self,
        instrument: &str,
        count: usize,
        granularity: Granularity,
    ) -> Result<Vec<Bar>>;

    /// Submit a market order with attached stop-loss and take-profit legs.
    async fn submit_bracket_order(&self, order: &BracketOrder) -> Result<()>;
}
