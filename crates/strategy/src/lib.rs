pub mod breakout;
pub mod config;

pub use breakout::{RangeBreakout, LOOKBACK};
pub use config::{InstrumentConfig, InstrumentsFileConfig};
