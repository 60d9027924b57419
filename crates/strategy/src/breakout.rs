use common::{Bar, Direction, TradeSignal};

/// Number of completed bars the evaluator inspects per checkpoint.
pub const LOOKBACK: usize = 30;

/// The first `RANGE_LEN` bars of the window establish the high/low range;
/// the remaining two bars confirm and enter the break.
const RANGE_LEN: usize = 28;

/// Range-breakout signal evaluator.
///
/// Looks at a 30-bar window of one-minute bars. The first 28 establish a
/// high/low range and bar 29 must hold inside it; bar 30 decides the entry.
/// Stateless and pure; the same window always yields the same result.
/// Prices are compared as-is, with no rounding.
#[derive(Debug, Clone, Copy)]
pub struct RangeBreakout {
    pub stop_loss_distance: f64,
    pub take_profit_distance: f64,
}

impl RangeBreakout {
    pub fn new(stop_loss_distance: f64, take_profit_distance: f64) -> Self {
        assert!(
            stop_loss_distance > 0.0,
            "stop-loss distance must be positive"
        );
        assert!(
            take_profit_distance > 0.0,
            "take-profit distance must be positive"
        );
        Self {
            stop_loss_distance,
            take_profit_distance,
        }
    }

    /// Evaluate a window of the most recent bars (oldest first) and decide
    /// whether a breakout entry exists right now.
    /// Returns `None` when fewer than `LOOKBACK` bars are supplied.
    pub fn evaluate(&self, bars: &[Bar]) -> Option<TradeSignal> {
        if bars.len() < LOOKBACK {
            return None;
        }

        // The first 28 bars define the range.
        let range = &bars[..RANGE_LEN];
        let range_high = range.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let range_low = range.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

        // Bar 29 must stay inside the range; an earlier break spends the setup.
        let check_bar = &bars[RANGE_LEN];
        if check_bar.high > range_high || check_bar.low < range_low {
            return None;
        }

        // Bar 30 decides the entry. Each arm requires the opposite bound to
        // hold; a bar that breaks both bounds is ambiguous and produces no
        // signal.
        let entry_bar = &bars[RANGE_LEN + 1];
        let entry = entry_bar.close;

        if entry_bar.high >= range_high && entry_bar.low > range_low {
            return Some(TradeSignal {
                direction: Direction::Long,
                entry_price: entry,
                stop_loss: entry - self.stop_loss_distance,
                take_profit: entry + self.take_profit_distance,
            });
        }

        if entry_bar.low <= range_low && entry_bar.high < range_high {
            return Some(TradeSignal {
                direction: Direction::Short,
                entry_price: entry,
                stop_loss: entry + self.stop_loss_distance,
                take_profit: entry - self.take_profit_distance,
            });
        }

        None
    }
}
