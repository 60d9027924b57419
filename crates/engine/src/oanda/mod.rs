//! OANDA v20 broker integration.

mod rest;

pub use rest::OandaClient;
