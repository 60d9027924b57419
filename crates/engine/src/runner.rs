use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use tracing::{error, info, warn};

use common::{BracketOrder, BrokerGateway, Granularity};
use strategy::{InstrumentConfig, RangeBreakout, LOOKBACK};

use crate::clock::Clock;
use crate::market;

/// Minutes of the hour at which a checkpoint pass runs, one per closed
/// half-hour block of one-minute bars.
const TRIGGER_MINUTES: [u32; 2] = [29, 59];

/// Poll interval while the market is open. Much shorter than the checkpoint
/// cadence; the minute guard keeps passes to one per trigger minute.
const POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Re-check interval while the market is closed.
const MARKET_CLOSED_INTERVAL: Duration = Duration::from_secs(3600);

/// Drives the checkpoint loop. On every trigger minute it pulls recent bars
/// for each configured instrument and evaluates the breakout rule,
/// submitting a bracket order when a signal fires.
///
/// Instruments are processed strictly sequentially; a failure on one is
/// reported and the pass moves on to the next. Nothing stops the loop once
/// it is running.
pub struct Runner {
    gateway: Arc<dyn BrokerGateway>,
    clock: Arc<dyn Clock>,
    instruments: Vec<InstrumentConfig>,
    /// Trigger minute of the last completed checkpoint pass. Written exactly
    /// once per trigger minute, after every instrument has been processed.
    last_evaluated_minute: Option<u32>,
}

impl Runner {
    pub fn new(
        gateway: Arc<dyn BrokerGateway>,
        clock: Arc<dyn Clock>,
        instruments: Vec<InstrumentConfig>,
    ) -> Self {
        Self {
            gateway,
            clock,
            instruments,
            last_evaluated_minute: None,
        }
    }

    /// Run the polling loop forever. Await directly or from `tokio::spawn`;
    /// it only returns if the process is torn down around it.
    pub async fn run(mut self) {
        info!(instruments = self.instruments.len(), "Runner started");
        loop {
            self.tick().await;
        }
    }

    /// One loop iteration: run a checkpoint pass when one is due, then sleep
    /// until the next poll.
    async fn tick(&mut self) {
        let now = self.clock.now();

        if !market::is_open(now) {
            info!("Markets are closed. Sleeping for 1 hour.");
            self.clock.sleep(MARKET_CLOSED_INTERVAL).await;
            return;
        }

        let minute = now.minute();
        if TRIGGER_MINUTES.contains(&minute) && self.last_evaluated_minute != Some(minute) {
            self.run_checkpoint(minute).await;
            // Sole write to the checkpoint guard, after the full pass.
            self.last_evaluated_minute = Some(minute);
        }

        self.clock.sleep(POLL_INTERVAL).await;
    }

    /// One checkpoint pass over all instruments, in configuration order.
    async fn run_checkpoint(&self, minute: u32) {
        info!(minute, "Trigger minute reached. Checking all instruments.");

        for inst in &self.instruments {
            info!(instrument = %inst.symbol, "Checking instrument");
            if let Err(e) = self.check_instrument(inst).await {
                error!(
                    instrument = %inst.symbol,
                    error = %e,
                    "Instrument check failed. Skipping for this checkpoint."
                );
            }
        }

        info!("Trade check complete.");
    }

    /// Run one instrument through fetch and evaluation, submitting an order
    /// when a signal fires.
    async fn check_instrument(&self, inst: &InstrumentConfig) -> common::Result<()> {
        let bars = self
            .gateway
            .fetch_recent_bars(&inst.symbol, LOOKBACK, Granularity::M1)
            .await?;

        if bars.len() < LOOKBACK {
            warn!(
                instrument = %inst.symbol,
                got = bars.len(),
                want = LOOKBACK,
                "Not enough bar data. Skipping."
            );
            return Ok(());
        }

        let evaluator = RangeBreakout::new(inst.stop_loss_distance, inst.take_profit_distance);
        let signal = match evaluator.evaluate(&bars) {
            Some(signal) => signal,
            None => return Ok(()),
        };

        info!(
            instrument = %inst.symbol,
            direction = %signal.direction,
            entry = signal.entry_price,
            "Trade signal found"
        );

        let order = BracketOrder::from_signal(&inst.symbol, &signal, inst.units);
        self.gateway.submit_bracket_order(&order).await?;

        info!(
            instrument = %inst.symbol,
            units = order.units,
            stop_loss = order.stop_loss,
            take_profit = order.take_profit,
            "Trade placed"
        );
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
