//! SignalBot runtime configuration schema.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use signalbot_core::{Result, SignalError};

use crate::defaults::*;

/// Which prediction strategy answers image messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Local frequency heuristic with anti-streak damping.
    #[default]
    Heuristic,
    /// Ask the remote text-generation endpoint.
    Remote,
}

impl FromStr for StrategyKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" | "local" => Ok(Self::Heuristic),
            "remote" | "advisor" => Ok(Self::Remote),
            other => Err(SignalError::Config(format!(
                "unknown strategy \"{other}\" (expected heuristic or remote)"
            ))),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => f.write_str("heuristic"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// SignalBot runtime configuration. Built once in `main` and passed down.
#[derive(Clone)]
pub struct Config {
    /// Telegram bot token. Only `serve` needs it.
    pub bot_token: Option<String>,
    /// Liveness server bind address
    pub bind_address: String,
    /// Liveness server port
    pub port: u16,
    pub strategy: StrategyKind,
    pub advisor_url: String,
    pub advisor_timeout_secs: u64,
    /// Path or name of the tesseract executable
    pub ocr_binary: String,
    pub ocr_language: String,
    /// Directory for per-request image files
    pub temp_dir: PathBuf,
    pub log_level: String,
    /// Enables the rolling JSON log file when set
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            strategy: StrategyKind::default(),
            advisor_url: DEFAULT_ADVISOR_URL.to_string(),
            advisor_timeout_secs: DEFAULT_ADVISOR_TIMEOUT_SECS,
            ocr_binary: DEFAULT_OCR_BINARY.to_string(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            temp_dir: std::env::temp_dir(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// The bot token, or a configuration error naming the variable.
    pub fn require_bot_token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| SignalError::Config("TELEGRAM_BOT_TOKEN is not set".into()))
    }

    pub fn liveness_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "***"))
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("strategy", &self.strategy)
            .field("advisor_url", &self.advisor_url)
            .field("advisor_timeout_secs", &self.advisor_timeout_secs)
            .field("ocr_binary", &self.ocr_binary)
            .field("ocr_language", &self.ocr_language)
            .field("temp_dir", &self.temp_dir)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_aliases() {
        assert_eq!("Heuristic".parse::<StrategyKind>().unwrap(), StrategyKind::Heuristic);
        assert_eq!(" remote ".parse::<StrategyKind>().unwrap(), StrategyKind::Remote);
        assert_eq!("advisor".parse::<StrategyKind>().unwrap(), StrategyKind::Remote);
        assert!("coinflip".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn debug_hides_token() {
        let config = Config {
            bot_token: Some("123456:secret-token-value".into()),
            ..Config::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token-value"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn missing_token_is_config_error() {
        let err = Config::default().require_bot_token().unwrap_err();
        assert!(matches!(err, SignalError::Config(_)));
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }
}
