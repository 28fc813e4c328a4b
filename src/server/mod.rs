pub mod routes;

use crate::market::MarketData;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn router<M: MarketData>(state: Arc<AppState<M>>) -> Router {
    Router::new()
        .route("/api/report", get(routes::get_report::<M>))
        .route("/api/score", get(routes::get_score::<M>))
        .route("/api/sectors", get(routes::get_sectors))
        .route("/api/counters", get(routes::get_counters::<M>))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
