//! CLI Status Command
//!
//! Checks whether a bot is answering on its liveness port.

use anyhow::Result;

use crate::terminal_output::{note_error, note_success};

pub async fn run(port: u16) -> Result<()> {
    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.text().await?;
            note_success(&format!("{url} → {}", body.trim()));
        }
        Ok(resp) => note_error(&format!("{url} answered {}", resp.status())),
        Err(_) => note_error(&format!("SignalBot is not running on port {port}")),
    }
    Ok(())
}
