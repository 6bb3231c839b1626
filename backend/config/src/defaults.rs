//! Default values for optional settings.

/// Liveness server port.
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Text-generation endpoint queried by the remote strategy.
pub const DEFAULT_ADVISOR_URL: &str = "https://apis-top.vercel.app/aryan/gpt-4";

pub const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_OCR_BINARY: &str = "tesseract";

pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

pub const DEFAULT_LOG_LEVEL: &str = "info";
