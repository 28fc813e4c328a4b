/// Domain-specific error types for the scoring service.
/// A failure on the primary ticker aborts the report; a failure on a
/// competitor ticker only drops the comparison section.
#[derive(Debug, thiserror::Error)]
pub enum EsgError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    Config(String),
}

impl EsgError {
    /// Message shown to end users. Internal detail stays in `Display`.
    pub fn user_message(&self) -> &'static str {
        match self {
            EsgError::InsufficientData(_) => "invalid ticker or no data available",
            EsgError::UpstreamFetch(_) | EsgError::Parse(_) => {
                "data fetch failed, try another ticker"
            }
            EsgError::InvalidRequest(_) => "invalid request parameters",
            EsgError::Config(_) => "service misconfigured",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            EsgError::InsufficientData(_) => 404,
            EsgError::UpstreamFetch(_) | EsgError::Parse(_) => 502,
            EsgError::InvalidRequest(_) => 400,
            EsgError::Config(_) => 500,
        }
    }
}

impl From<reqwest::Error> for EsgError {
    fn from(e: reqwest::Error) -> Self {
        EsgError::UpstreamFetch(e.to_string())
    }
}

impl From<serde_json::Error> for EsgError {
    fn from(e: serde_json::Error) -> Self {
        EsgError::Parse(e.to_string())
    }
}

pub type EsgResult<T> = Result<T, EsgError>;
