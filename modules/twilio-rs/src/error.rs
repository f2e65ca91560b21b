use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwilioError>;

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("Invalid phone number (expected E.164, e.g. +15551234567): {0}")]
    InvalidNumber(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Twilio API error (status {status}, code {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TwilioError {
    fn from(err: reqwest::Error) -> Self {
        TwilioError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TwilioError {
    fn from(err: serde_json::Error) -> Self {
        TwilioError::Parse(err.to_string())
    }
}
