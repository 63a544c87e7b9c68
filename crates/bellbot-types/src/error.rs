use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BellbotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Rejected by service: {0}")]
    Rejected(String),

    #[error("Speech engine error: {0}")]
    Speech(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for BellbotError {
    fn from(e: serde_json::Error) -> Self {
        BellbotError::Decode(e.to_string())
    }
}
