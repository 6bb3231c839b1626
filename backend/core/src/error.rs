use thiserror::Error;

/// Top-level error type for the SignalBot pipeline.
///
/// Every request-scope variant is turned into a chat reply by the channel
/// layer; only `Config` is fatal, and only at startup.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("image download failed: {0}")]
    Download(String),

    #[error("text recognition failed: {0}")]
    Recognition(String),

    #[error("advisory endpoint failed: {0}")]
    Advisory(String),

    #[error("not enough digits: found {found}, need at least {required}")]
    InsufficientEvidence { found: usize, required: usize },

    #[error("digit out of range: {0}")]
    InvalidDigit(u8),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SignalError>;
