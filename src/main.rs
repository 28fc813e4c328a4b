mod commentary;
mod config;
mod errors;
mod market;
mod report;
mod scoring;
mod server;
mod state;

use crate::market::client::YahooClient;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("esg_proxy starting");

    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        market_data = %cfg.market_data_base_url,
        default_period = %cfg.default_period,
        ma_window = cfg.moving_average_window,
        vol_window = cfg.rolling_vol_window,
        "config loaded"
    );

    let market = YahooClient::new(&cfg.market_data_base_url, cfg.http_timeout_secs);
    let port = cfg.server_port;
    let app = server::router(AppState::new(cfg, market));

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
