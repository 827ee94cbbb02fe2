use thiserror::Error;

pub type Result<T> = std::result::Result<T, WvwError>;

#[derive(Debug, Error)]
pub enum WvwError {
    /// 어떤 매치업에도 속하지 않은 월드 (리셋 직후 등)
    #[error("World {world} is not part of any current matchup")]
    NotFound { world: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// 디코딩은 됐지만 형식이 맞지 않는 응답
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for WvwError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WvwError::Parse(err.to_string())
        } else {
            WvwError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WvwError {
    fn from(err: serde_json::Error) -> Self {
        WvwError::Parse(err.to_string())
    }
}
