//! CLI Scan Command
//!
//! Feeds a local image through the same pipeline the bot uses, so OCR and
//! strategy settings can be checked without Telegram.

use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use bytes::Bytes;
use signalbot_config::Config;
use signalbot_core::{ChatRequest, ImageSource, ReplyKind, SignalError};

use crate::terminal_output::{note_info, note_warn, strip_html};

/// An image file read from disk.
pub struct LocalImage(pub PathBuf);

#[async_trait]
impl ImageSource for LocalImage {
    async fn fetch(&self) -> signalbot_core::Result<Bytes> {
        tokio::fs::read(&self.0)
            .await
            .map(Bytes::from)
            .map_err(|e| SignalError::Download(format!("cannot read {}: {e}", self.0.display())))
    }
}

pub async fn run(config: &Config, image: PathBuf) -> Result<()> {
    let pipeline = crate::build_pipeline(config)?;
    note_info(&format!(
        "Scanning {} with the {} strategy",
        image.display(),
        pipeline.strategy_name()
    ));

    let reply = pipeline
        .handle_image(&ChatRequest::new(0), &LocalImage(image))
        .await;

    match reply.kind {
        ReplyKind::ProcessingError => bail!("{}", strip_html(&reply.text)),
        ReplyKind::InsufficientEvidence => note_warn(&strip_html(&reply.text)),
        _ => println!("{}", strip_html(&reply.text)),
    }
    Ok(())
}
