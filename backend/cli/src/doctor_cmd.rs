//! CLI Doctor Command
//!
//! Checks the local prerequisites of a deployment before it goes live.

use std::process::Stdio;

use anyhow::{bail, Result};
use signalbot_config::{Config, StrategyKind};
use tokio::process::Command;

use crate::terminal_output::{note_error, note_success, note_warn};

#[derive(Debug, PartialEq)]
enum Check {
    Pass(String),
    Warn(String),
    Fail(String),
}

pub async fn run(config: &Config) -> Result<()> {
    println!("\n🔍 Running SignalBot Doctor...\n");

    let checks = vec![
        check_token(config),
        check_ocr(&config.ocr_binary).await,
        check_temp_dir(config).await,
        check_strategy(config),
    ];

    let mut failed = 0;
    for check in &checks {
        match check {
            Check::Pass(msg) => note_success(msg),
            Check::Warn(msg) => note_warn(msg),
            Check::Fail(msg) => {
                failed += 1;
                note_error(msg);
            }
        }
    }

    println!();
    if failed > 0 {
        bail!("{failed} check(s) failed");
    }
    note_success("All checks passed");
    Ok(())
}

fn check_token(config: &Config) -> Check {
    match config.require_bot_token() {
        Ok(_) => Check::Pass("TELEGRAM_BOT_TOKEN is set".into()),
        Err(_) => Check::Fail("TELEGRAM_BOT_TOKEN is missing (REQUIRED)".into()),
    }
}

async fn check_ocr(binary: &str) -> Check {
    let status = Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
    match status {
        Ok(s) if s.success() => Check::Pass(format!("OCR engine `{binary}` is runnable")),
        Ok(s) => Check::Fail(format!("OCR engine `{binary}` exited with {s}")),
        Err(e) => Check::Fail(format!("OCR engine `{binary}` not found: {e}")),
    }
}

async fn check_temp_dir(config: &Config) -> Check {
    let dir = &config.temp_dir;
    match tokio::fs::create_dir_all(dir).await {
        Ok(()) => Check::Pass(format!("Temp directory {} is usable", dir.display())),
        Err(e) => Check::Fail(format!("Temp directory {} is not usable: {e}", dir.display())),
    }
}

fn check_strategy(config: &Config) -> Check {
    match config.strategy {
        StrategyKind::Heuristic => Check::Pass("Strategy: local heuristic".into()),
        StrategyKind::Remote => Check::Warn(format!(
            "Strategy: remote advisor at {} (not contacted)",
            config.advisor_url
        )),
    }
}
