//! The scheduling loop and its broker plumbing, including the OANDA REST
//! client.

pub mod clock;
pub mod market;
pub mod oanda;
pub mod runner;

pub use clock::{Clock, SystemClock};
pub use oanda::OandaClient;
pub use runner::Runner;
