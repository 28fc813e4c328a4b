use crate::commentary::{Commentary, GaugeBand};
use crate::errors::EsgResult;
use crate::market::sectors::competitor_for;
use crate::market::{normalize_ticker, MarketData};
use crate::scoring::series::{chart_points, ChartPoint};
use crate::scoring::{score_series, ScoreResult};
use crate::state::{CompanyProfile, InsightDepth, Period, RequestCounters, RiskPreference};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub ticker: String,
    pub period: Period,
    pub risk_preference: RiskPreference,
    pub depth: InsightDepth,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Gauge {
    pub value: f64,
    pub band: GaugeBand,
    pub color: &'static str,
}

impl Gauge {
    pub fn new(esg_score: f64) -> Self {
        let band = GaugeBand::for_score(esg_score);
        Self {
            value: esg_score,
            band,
            color: band.color(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Comparison {
    pub company_ticker: String,
    pub company_score: f64,
    pub competitor_ticker: String,
    pub competitor_score: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EsgReport {
    pub profile: CompanyProfile,
    pub period: Period,
    pub score: ScoreResult,
    pub gauge: Gauge,
    pub chart: Vec<ChartPoint>,
    pub comparison: Option<Comparison>,
    pub commentary: Commentary,
}

/// Assembles a full report around the scoring engine.
pub struct ReportService<M> {
    market: M,
    ma_window: usize,
    vol_window: usize,
    counters: Arc<RequestCounters>,
}

impl<M: MarketData> ReportService<M> {
    pub fn new(market: M, ma_window: usize, vol_window: usize, counters: Arc<RequestCounters>) -> Self {
        Self {
            market,
            ma_window,
            vol_window,
            counters,
        }
    }

    /// Score a single ticker with no surrounding report.
    pub async fn score_ticker(&self, raw_ticker: &str, period: Period) -> EsgResult<ScoreResult> {
        let ticker = normalize_ticker(raw_ticker)?;
        let series = self.market.fetch_history(&ticker, period).await.inspect_err(|e| {
            RequestCounters::bump(&self.counters.upstream_failures);
            tracing::warn!(ticker = %ticker, error = %e, "history fetch failed");
        })?;
        score_series(&series)
    }

    /// Primary-ticker failures abort. Profile and competitor failures degrade.
    pub async fn build_report(&self, req: &ReportRequest) -> EsgResult<EsgReport> {
        let ticker = normalize_ticker(&req.ticker)?;
        tracing::info!(ticker = %ticker, period = %req.period, "building report");

        let (history, profile) = tokio::join!(
            self.market.fetch_history(&ticker, req.period),
            self.market.fetch_profile(&ticker),
        );

        let series = history.inspect_err(|e| {
            RequestCounters::bump(&self.counters.upstream_failures);
            tracing::warn!(ticker = %ticker, error = %e, "history fetch failed");
        })?;
        let score = score_series(&series)?;

        let profile = profile.unwrap_or_else(|e| {
            tracing::warn!(ticker = %ticker, error = %e, "profile lookup failed, sector unknown");
            CompanyProfile::unknown(&ticker)
        });

        let comparison = self.compare(&ticker, &profile.sector, req.period, &score).await;
        let chart = chart_points(&series, self.ma_window, self.vol_window);
        let commentary = Commentary::build(&profile, &score, req.risk_preference, req.depth);

        tracing::info!(
            ticker = %ticker,
            sector = %profile.sector,
            esg_score = score.esg_score,
            points = series.len(),
            competitor = comparison.as_ref().map(|c| c.competitor_ticker.as_str()),
            "report built"
        );

        Ok(EsgReport {
            profile,
            period: req.period,
            gauge: Gauge::new(score.esg_score),
            score,
            chart,
            comparison,
            commentary,
        })
    }

    async fn compare(
        &self,
        ticker: &str,
        sector: &str,
        period: Period,
        company: &ScoreResult,
    ) -> Option<Comparison> {
        let competitor = competitor_for(sector, ticker)?;

        let scored = match self.market.fetch_history(competitor, period).await {
            Ok(series) => score_series(&series),
            Err(e) => Err(e),
        };

        match scored {
            Ok(result) => Some(Comparison {
                company_ticker: ticker.to_string(),
                company_score: company.esg_score,
                competitor_ticker: competitor.to_string(),
                competitor_score: result.esg_score,
            }),
            Err(e) => {
                RequestCounters::bump(&self.counters.comparisons_suppressed);
                tracing::warn!(competitor = competitor, error = %e, "competitor scoring failed, comparison suppressed");
                None
            }
        }
    }
}
