use crate::errors::{EsgError, EsgResult};
use crate::state::Period;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub market_data_base_url: String,
    pub server_port: u16,
    pub http_timeout_secs: u64,
    pub default_period: Period,
    pub moving_average_window: usize,
    pub rolling_vol_window: usize,
}

impl AppConfig {
    pub fn from_env() -> EsgResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. `from_env` feeds it the
    /// process environment; tests feed it a map.
    pub fn from_lookup<F>(lookup: F) -> EsgResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| EsgError::Config(format!("SERVER_PORT: {e}")))?;

        let http_timeout_secs = var_or("HTTP_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| EsgError::Config(format!("HTTP_TIMEOUT_SECS: {e}")))?;

        let default_period = var_or("DEFAULT_PERIOD", "1y")
            .parse::<Period>()
            .map_err(|e| EsgError::Config(format!("DEFAULT_PERIOD: {e}")))?;

        let moving_average_window = parse_window(&var_or("MOVING_AVERAGE_WINDOW", "50"), "MOVING_AVERAGE_WINDOW")?;
        let rolling_vol_window = parse_window(&var_or("ROLLING_VOL_WINDOW", "30"), "ROLLING_VOL_WINDOW")?;

        Ok(Self {
            market_data_base_url: var_or(
                "MARKET_DATA_BASE_URL",
                "https://query1.finance.yahoo.com",
            ),
            server_port,
            http_timeout_secs,
            default_period,
            moving_average_window,
            rolling_vol_window,
        })
    }
}

fn parse_window(raw: &str, key: &str) -> EsgResult<usize> {
    let window = raw
        .parse::<usize>()
        .map_err(|e| EsgError::Config(format!("{key}: {e}")))?;
    if window < 2 {
        return Err(EsgError::Config(format!("{key}: window must be at least 2, got {window}")));
    }
    Ok(window)
}
