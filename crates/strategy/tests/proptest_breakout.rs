use chrono::Utc;
use proptest::prelude::*;

use common::{Bar, Direction};
use strategy::{RangeBreakout, LOOKBACK};

fn bars_from(raw: &[(f64, f64, f64)]) -> Vec<Bar> {
    raw.iter()
        .map(|&(a, b, close)| Bar {
            time: Utc::now(),
            high: a.max(b),
            low: a.min(b),
            close,
        })
        .collect()
}

proptest! {
    /// Evaluation on arbitrary window lengths and price values must never
    /// panic or index out of range.
    #[test]
    fn never_panics_on_arbitrary_windows(
        raw in prop::collection::vec(
            (0.0001f64..100_000.0, 0.0001f64..100_000.0, 0.0001f64..100_000.0),
            0..64,
        )
    ) {
        let evaluator = RangeBreakout::new(1.0, 3.0);
        let _ = evaluator.evaluate(&bars_from(&raw));
    }

    /// Windows shorter than the lookback never produce a signal.
    #[test]
    fn short_windows_never_signal(
        raw in prop::collection::vec(
            (0.0001f64..100_000.0, 0.0001f64..100_000.0, 0.0001f64..100_000.0),
            0..LOOKBACK,
        )
    ) {
        let evaluator = RangeBreakout::new(1.0, 3.0);
        prop_assert!(evaluator.evaluate(&bars_from(&raw)).is_none());
    }

    /// Whenever a signal is produced, its exits sit exactly the configured
    /// distances from the entry, on the side implied by the direction.
    #[test]
    fn signal_exits_follow_configured_distances(
        raw in prop::collection::vec(
            (1.0f64..1000.0, 1.0f64..1000.0, 1.0f64..1000.0),
            LOOKBACK..=LOOKBACK,
        ),
        sl_distance in 0.001f64..50.0,
        tp_distance in 0.001f64..50.0,
    ) {
        let evaluator = RangeBreakout::new(sl_distance, tp_distance);
        if let Some(signal) = evaluator.evaluate(&bars_from(&raw)) {
            let entry = signal.entry_price;
            match signal.direction {
                Direction::Long => {
                    prop_assert!((signal.stop_loss - (entry - sl_distance)).abs() < 1e-9);
                    prop_assert!((signal.take_profit - (entry + tp_distance)).abs() < 1e-9);
                }
                Direction::Short => {
                    prop_assert!((signal.stop_loss - (entry + sl_distance)).abs() < 1e-9);
                    prop_assert!((signal.take_profit - (entry - tp_distance)).abs() < 1e-9);
                }
            }
        }
    }
}
