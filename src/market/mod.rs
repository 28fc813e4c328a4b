pub mod client;
pub mod sectors;
pub mod types;

use crate::errors::{EsgError, EsgResult};
use crate::state::{CompanyProfile, Period, PriceSeries};
use std::future::Future;

/// Market-data collaborator. Implementations fetch; they never score.
/// Futures are `Send` so handlers can run them on the multi-threaded runtime.
pub trait MarketData: Send + Sync + 'static {
    /// Daily closes over `period`. An unknown symbol yields an empty series;
    /// transport and provider failures yield `UpstreamFetch`.
    fn fetch_history(
        &self,
        ticker: &str,
        period: Period,
    ) -> impl Future<Output = EsgResult<PriceSeries>> + Send;

    /// Display name and sector for `ticker`.
    fn fetch_profile(&self, ticker: &str) -> impl Future<Output = EsgResult<CompanyProfile>> + Send;
}

/// Trim and upper-case a user-supplied symbol, rejecting anything that
/// cannot be a listed ticker.
pub fn normalize_ticker(raw: &str) -> EsgResult<String> {
    let ticker = raw.trim().to_ascii_uppercase();
    if ticker.is_empty() {
        return Err(EsgError::InvalidRequest("ticker is empty".into()));
    }
    if ticker.len() > 16
        || !ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(EsgError::InvalidRequest(format!("malformed ticker '{ticker}'")));
    }
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk-b").unwrap(), "BRK-B");
        assert_eq!(normalize_ticker("^gspc").unwrap(), "^GSPC");
        assert!(normalize_ticker("").is_err());
        assert!(normalize_ticker("AA PL").is_err());
        assert!(normalize_ticker("../etc").is_err());
    }
}
