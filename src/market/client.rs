use super::types::{parse_chart, parse_search};
use super::MarketData;
use crate::errors::{EsgError, EsgResult};
use crate::state::{CompanyProfile, Period, PriceSeries};
use reqwest::{Client, StatusCode};

/// Yahoo's public endpoints reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance REST client. All methods return Result, never panic.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .user_agent(USER_AGENT)
                .pool_max_idle_per_host(4)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> EsgResult<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| EsgError::UpstreamFetch(format!("GET {path}: {e}")))?;
        Ok((status, body))
    }
}

impl MarketData for YahooClient {
    async fn fetch_history(&self, ticker: &str, period: Period) -> EsgResult<PriceSeries> {
        let path = format!("/v8/finance/chart/{ticker}");
        let (status, body) = self
            .get_text(&path, &[("range", period.as_range()), ("interval", "1d")])
            .await?;

        // Unknown symbols come back as 404 with a chart error body; let the
        // parser decide whether that is "no data" or a real failure.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(EsgError::UpstreamFetch(format!(
                "GET {path}: HTTP {status}: {}",
                truncate(&body, 200)
            )));
        }

        let series = parse_chart(ticker, &body)?;
        if series.is_empty() {
            tracing::warn!(ticker = %ticker, period = %period, "provider returned no history");
        }
        tracing::debug!(ticker = %ticker, period = %period, points = series.len(), "history fetched");
        Ok(series)
    }

    async fn fetch_profile(&self, ticker: &str) -> EsgResult<CompanyProfile> {
        let path = "/v1/finance/search";
        let (status, body) = self
            .get_text(path, &[("q", ticker), ("quotesCount", "5"), ("newsCount", "0")])
            .await?;

        if !status.is_success() {
            return Err(EsgError::UpstreamFetch(format!(
                "GET {path}: HTTP {status}: {}",
                truncate(&body, 200)
            )));
        }

        parse_search(ticker, &body)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
