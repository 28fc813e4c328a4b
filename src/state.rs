use crate::config::AppConfig;
use crate::market::MarketData;
use crate::report::ReportService;
use chrono::NaiveDate;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request parameters ──

/// Lookback window handed to the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Period {
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Period {
    pub fn as_range(self) -> &'static str {
        match self {
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_range())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6mo" | "6 months" => Ok(Period::SixMonths),
            "1y" | "1 year" => Ok(Period::OneYear),
            "2y" | "2 years" => Ok(Period::TwoYears),
            other => Err(format!("unknown period '{other}' (expected 6mo, 1y or 2y)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RiskPreference {
    Conservative,
    Balanced,
    Aggressive,
}

impl std::str::FromStr for RiskPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskPreference::Conservative),
            "balanced" => Ok(RiskPreference::Balanced),
            "aggressive" => Ok(RiskPreference::Aggressive),
            other => Err(format!("unknown risk profile '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightDepth {
    Standard,
    Deep,
}

impl std::str::FromStr for InsightDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(InsightDepth::Standard),
            "deep" | "deep analysis" => Ok(InsightDepth::Deep),
            other => Err(format!("unknown insight depth '{other}'")),
        }
    }
}

// ── Market data ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronological daily closes for one ticker.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    #[inline]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompanyProfile {
    pub ticker: String,
    pub name: String,
    pub sector: String,
}

impl CompanyProfile {
    /// Used when the profile lookup fails; the report still renders.
    pub fn unknown(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            sector: "Unknown".to_string(),
        }
    }
}

// ── Lock-free request counters ──

pub struct RequestCounters {
    pub reports_served: AtomicU64,
    pub scores_served: AtomicU64,
    pub upstream_failures: AtomicU64,
    pub comparisons_suppressed: AtomicU64,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self {
            reports_served: AtomicU64::new(0),
            scores_served: AtomicU64::new(0),
            upstream_failures: AtomicU64::new(0),
            comparisons_suppressed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for RequestCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ── Application shared state ──

pub struct AppState<M> {
    pub config: AppConfig,
    pub reports: ReportService<M>,
    pub counters: Arc<RequestCounters>,
}

impl<M: MarketData> AppState<M> {
    pub fn new(config: AppConfig, market: M) -> Arc<Self> {
        let counters = Arc::new(RequestCounters::new());
        let reports = ReportService::new(
            market,
            config.moving_average_window,
            config.rolling_vol_window,
            counters.clone(),
        );
        Arc::new(Self {
            config,
            reports,
            counters,
        })
    }
}
