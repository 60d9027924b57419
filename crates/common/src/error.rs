use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network or auth failure reaching the broker. Fatal at startup,
    /// recoverable by skipping the instrument once the loop is running.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Malformed or insufficient bar data from the broker.
    #[error("Market data error: {0}")]
    Data(String),

    /// The broker refused the order. Logged, never retried.
    #[error("Order rejected: {0}")]
    Rejection(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
