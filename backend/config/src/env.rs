//! Environment loading for [`Config`].
//!
//! Every setting comes from a single variable; blank values count as unset.
//! Parsing goes through a lookup function so tests can supply a map instead
//! of mutating the process environment.

use std::collections::HashMap;
use std::path::PathBuf;

use signalbot_core::{Result, SignalError};
use tracing::debug;

use crate::schema::Config;

pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const PORT_VAR: &str = "PORT";
pub const BIND_VAR: &str = "SIGNALBOT_BIND";
pub const STRATEGY_VAR: &str = "SIGNALBOT_STRATEGY";
pub const ADVISOR_URL_VAR: &str = "SIGNALBOT_ADVISOR_URL";
pub const ADVISOR_TIMEOUT_VAR: &str = "SIGNALBOT_ADVISOR_TIMEOUT_SECS";
pub const OCR_BIN_VAR: &str = "SIGNALBOT_OCR_BIN";
pub const OCR_LANG_VAR: &str = "SIGNALBOT_OCR_LANG";
pub const TEMP_DIR_VAR: &str = "SIGNALBOT_TEMP_DIR";
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";
pub const LOG_DIR_VAR: &str = "SIGNALBOT_LOG_DIR";

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<Config> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration from a provided map (useful for testing).
pub fn load_from_map(env: &HashMap<String, String>) -> Result<Config> {
    load_with(|key| env.get(key).cloned())
}

fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut config = Config::default();

    config.bot_token = get(TOKEN_VAR);
    if let Some(bind) = get(BIND_VAR) {
        config.bind_address = bind;
    }
    if let Some(port) = get(PORT_VAR) {
        config.port = parse_number(PORT_VAR, &port)?;
    }
    if let Some(strategy) = get(STRATEGY_VAR) {
        config.strategy = strategy.parse()?;
    }
    if let Some(url) = get(ADVISOR_URL_VAR) {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SignalError::Config(format!(
                "{ADVISOR_URL_VAR} must be an http(s) URL, got \"{url}\""
            )));
        }
        config.advisor_url = url;
    }
    if let Some(secs) = get(ADVISOR_TIMEOUT_VAR) {
        config.advisor_timeout_secs = parse_number(ADVISOR_TIMEOUT_VAR, &secs)?;
    }
    if let Some(bin) = get(OCR_BIN_VAR) {
        config.ocr_binary = bin;
    }
    if let Some(lang) = get(OCR_LANG_VAR) {
        config.ocr_language = lang;
    }
    if let Some(dir) = get(TEMP_DIR_VAR) {
        config.temp_dir = PathBuf::from(dir);
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.log_level = level;
    }
    config.log_dir = get(LOG_DIR_VAR).map(PathBuf::from);

    debug!(config = ?config, "Configuration loaded");
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| SignalError::Config(format!("{var} must be a number, got \"{raw}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StrategyKind;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load_from_map(&env(&[(TOKEN_VAR, "123:abc")])).unwrap();
        assert_eq!(config.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.strategy, StrategyKind::Heuristic);
        assert_eq!(config.ocr_binary, "tesseract");
        assert_eq!(config.ocr_language, "eng");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = load_from_map(&env(&[(TOKEN_VAR, "   ")])).unwrap();
        assert!(config.bot_token.is_none());
        assert!(config.require_bot_token().is_err());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load_from_map(&env(&[
            (TOKEN_VAR, "123:abc"),
            (PORT_VAR, "3000"),
            (STRATEGY_VAR, "remote"),
            (ADVISOR_URL_VAR, "http://localhost:9000/ask"),
            (TEMP_DIR_VAR, "/var/tmp/signalbot"),
            (LOG_DIR_VAR, "/var/log/signalbot"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.liveness_addr(), "0.0.0.0:3000");
        assert_eq!(config.strategy, StrategyKind::Remote);
        assert_eq!(config.advisor_url, "http://localhost:9000/ask");
        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/signalbot"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/signalbot")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load_from_map(&env(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn non_http_advisor_url_is_rejected() {
        let err = load_from_map(&env(&[(ADVISOR_URL_VAR, "ftp://example.com")])).unwrap_err();
        assert!(matches!(err, SignalError::Config(_)));
    }
}
