use crate::errors::{EsgError, EsgResult};
use crate::state::{CompanyProfile, PricePoint, PriceSeries};
use serde::Deserialize;

// ── Chart endpoint (/v8/finance/chart/{symbol}) ──

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Option<ChartNode>,
}

#[derive(Debug, Deserialize)]
pub struct ChartNode {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl ChartError {
    /// Yahoo reports unknown or delisted symbols as "Not Found".
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("not found"))
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    #[serde(default)]
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Decode a chart payload into a chronological close series.
/// Null, non-finite and non-positive closes are skipped. "Not Found" and an
/// empty result both decode to an empty series; any other provider error is
/// an upstream failure.
pub fn parse_chart(ticker: &str, body: &str) -> EsgResult<PriceSeries> {
    let env: ChartEnvelope = serde_json::from_str(body)?;
    let node = env
        .chart
        .ok_or_else(|| EsgError::Parse(format!("{ticker}: chart node missing")))?;

    if let Some(err) = node.error {
        if err.is_not_found() {
            return Ok(PriceSeries::new(ticker, Vec::new()));
        }
        return Err(EsgError::UpstreamFetch(format!(
            "{ticker}: {} {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        )));
    }

    let Some(result) = node.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::new(ticker, Vec::new()));
    };

    let offset = result.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points: Vec<PricePoint> = timestamps
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite() && *c > 0.0)?;
            let date = chrono::DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    // Keep chronological order and one bar per day (last wins).
    points.sort_by_key(|p| p.date);
    points.dedup_by(|later, earlier| {
        if later.date == earlier.date {
            earlier.close = later.close;
            true
        } else {
            false
        }
    });

    Ok(PriceSeries::new(ticker, points))
}

// ── Search endpoint (/v1/finance/search) ──

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub quotes: Option<Vec<SearchQuote>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuote {
    pub symbol: Option<String>,
    pub longname: Option<String>,
    pub shortname: Option<String>,
    pub sector: Option<String>,
}

/// Read name and sector from the quote whose symbol is exactly `ticker`.
/// Search also returns related listings; those are never borrowed from.
/// No match or missing fields fall back to the ticker and "Unknown".
pub fn parse_search(ticker: &str, body: &str) -> EsgResult<CompanyProfile> {
    let env: SearchEnvelope = serde_json::from_str(body)?;
    let quotes = env.quotes.unwrap_or_default();

    let quote = quotes
        .iter()
        .find(|q| {
            q.symbol
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(ticker))
        });

    let mut profile = CompanyProfile::unknown(ticker);
    if let Some(q) = quote {
        if let Some(name) = q.longname.clone().or_else(|| q.shortname.clone()) {
            profile.name = name;
        }
        if let Some(sector) = q.sector.clone().filter(|s| !s.trim().is_empty()) {
            profile.sector = sector;
        }
    }
    Ok(profile)
}
