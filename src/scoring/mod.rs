pub mod engine;
pub mod series;

pub use engine::{score_series, ScoreResult};

/// Trading days used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
