use crate::errors::{EsgError, EsgResult};
use crate::market::sectors;
use crate::market::MarketData;
use crate::report::{EsgReport, ReportRequest};
use crate::state::{AppState, InsightDepth, Period, RequestCounters, RiskPreference};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct ReportQuery {
    pub ticker: Option<String>,
    pub period: Option<String>,
    pub risk: Option<String>,
    pub depth: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ScoreQuery {
    pub ticker: Option<String>,
    pub period: Option<String>,
}

#[derive(serde::Serialize)]
pub struct ScoreResponse {
    pub ticker: String,
    pub period: Period,
    #[serde(flatten)]
    pub score: crate::scoring::ScoreResult,
}

impl IntoResponse for EsgError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({
            "error": self.user_message(),
            "detail": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// A missing `ticker` is answered in the JSON error shape, not by the
/// extractor's plain-text rejection.
fn required_ticker(raw: Option<String>) -> EsgResult<String> {
    raw.ok_or_else(|| EsgError::InvalidRequest("ticker is required".into()))
}

fn parse_param<T>(raw: Option<&str>, default: T) -> EsgResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse::<T>().map_err(EsgError::InvalidRequest),
        _ => Ok(default),
    }
}

/// GET /api/report -- full report: score, gauge, chart data, comparison, commentary
pub async fn get_report<M: MarketData>(
    State(state): State<Arc<AppState<M>>>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<EsgReport>, EsgError> {
    let req = ReportRequest {
        ticker: required_ticker(params.ticker)?,
        period: parse_param(params.period.as_deref(), state.config.default_period)?,
        risk_preference: parse_param(params.risk.as_deref(), RiskPreference::Balanced)?,
        depth: parse_param(params.depth.as_deref(), InsightDepth::Standard)?,
    };

    let report = state.reports.build_report(&req).await?;
    RequestCounters::bump(&state.counters.reports_served);
    Ok(Json(report))
}

/// GET /api/score -- score only
pub async fn get_score<M: MarketData>(
    State(state): State<Arc<AppState<M>>>,
    Query(params): Query<ScoreQuery>,
) -> Result<Json<ScoreResponse>, EsgError> {
    let ticker = required_ticker(params.ticker)?;
    let period = parse_param(params.period.as_deref(), state.config.default_period)?;
    let score = state.reports.score_ticker(&ticker, period).await?;
    RequestCounters::bump(&state.counters.scores_served);
    Ok(Json(ScoreResponse {
        ticker: ticker.trim().to_ascii_uppercase(),
        period,
        score,
    }))
}

/// GET /api/sectors -- static sector/peer table
pub async fn get_sectors() -> Json<Vec<sectors::SectorEntry>> {
    Json(sectors::sectors())
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters<M: MarketData>(
    State(state): State<Arc<AppState<M>>>,
) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "reports_served": state.counters.reports_served.load(Relaxed),
        "scores_served": state.counters.scores_served.load(Relaxed),
        "upstream_failures": state.counters.upstream_failures.load(Relaxed),
        "comparisons_suppressed": state.counters.comparisons_suppressed.load(Relaxed),
    }))
}
