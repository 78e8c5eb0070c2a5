//! Structured errors for the known-answer engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("bad hex field: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cipher call failed: {0}")]
    Crypto(String),

    #[error("case has no `{0}` field")]
    MissingField(&'static str),

    #[error("expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("no handler for {0}")]
    Unsupported(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{0} cases did not match")]
    Failures(usize),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<blockmode_algorithms::Error> for EngineError {
    fn from(e: blockmode_algorithms::Error) -> Self {
        EngineError::Crypto(e.to_string())
    }
}

impl From<blockmode_api::Error> for EngineError {
    fn from(e: blockmode_api::Error) -> Self {
        EngineError::Crypto(e.to_string())
    }
}
