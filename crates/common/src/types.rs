use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed price bar at a fixed granularity.
/// The gateway only ever returns finished bars, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: DateTime<Utc>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Side of a breakout signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Sign applied to the configured unit size when building an order.
    pub fn unit_sign(&self) -> i64 {
        match self {
            Direction::Long => 1,
            Direction::Short => -1,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Signal emitted by the evaluator, consumed immediately by order
/// submission. Never retained across checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// A market order with attached exit legs, ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketOrder {
    pub instrument: String,
    /// Signed units: positive opens a long position, negative a short.
    pub units: i64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl BracketOrder {
    /// Build the order for a signal using the instrument's fixed unit size.
    pub fn from_signal(instrument: impl Into<String>, signal: &TradeSignal, unit_size: u32) -> Self {
        Self {
            instrument: instrument.into(),
            units: signal.direction.unit_sign() * i64::from(unit_size),
            take_profit: signal.take_profit,
            stop_loss: signal.stop_loss,
        }
    }
}

/// Which OANDA server the bot trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Demo account host; fills never touch real money.
    Practice,
    Live,
}

impl Environment {
    pub fn rest_host(&self) -> &'static str {
        match self {
            Environment::Practice => "https://api-fxpractice.oanda.com",
            Environment::Live => "https://api-fxtrade.oanda.com",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Practice => write!(f, "practice"),
            Environment::Live => write!(f, "live"),
        }
    }
}

/// Candlestick granularity understood by the bars endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    M1,
    M5,
    M15,
    M30,
    H1,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::M1 => "M1",
            Granularity::M5 => "M5",
            Granularity::M15 => "M15",
            Granularity::M30 => "M30",
            Granularity::H1 => "H1",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
