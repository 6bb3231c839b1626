use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::types::{DigitSequence, Forecast};

/// An OCR engine turning an image on disk into plain text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Engine name for logging.
    fn name(&self) -> &str;

    /// Recognize all text in the image at `image_path`.
    /// Fails with `SignalError::Recognition`.
    async fn recognize(&self, image_path: &Path) -> Result<String>;
}

/// A handle to one inbound image that can be downloaded once.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the raw image bytes. Fails with `SignalError::Download`.
    async fn fetch(&self) -> Result<Bytes>;
}

/// Trait for free-text generation endpoints used by the remote advisor.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw response body.
    /// Fails with `SignalError::Advisory`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Turns observed digits into a forecast. One implementation is active per
/// running bot, chosen from configuration.
#[async_trait]
pub trait PredictionStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn forecast(&self, digits: &DigitSequence) -> Result<Forecast>;
}
