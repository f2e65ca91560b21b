use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwpcError>;

#[derive(Debug, Error)]
pub enum SwpcError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}) from {url}")]
    Api { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SwpcError {
    fn from(err: reqwest::Error) -> Self {
        SwpcError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SwpcError {
    fn from(err: serde_json::Error) -> Self {
        SwpcError::Parse(err.to_string())
    }
}
