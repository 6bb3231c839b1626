//! Optical Character Recognition (OCR)
//!
//! Runs the Tesseract command-line engine against an image on disk and
//! returns whatever text it transcribes. Output is best effort.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use signalbot_core::{Result, SignalError, TextRecognizer};
use tracing::{debug, info};

/// Upper bound on a single tesseract invocation.
const OCR_TIMEOUT: Duration = Duration::from_secs(60);

/// Tesseract invoked as `<binary> <image> stdout -l <language>`.
pub struct TesseractCli {
    binary: String,
    language: String,
    timeout: Duration,
}

impl TesseractCli {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            timeout: OCR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl TextRecognizer for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(&self, image_path: &Path) -> Result<String> {
        info!(image = %image_path.display(), lang = %self.language, "Running OCR");

        let result = tokio::time::timeout(self.timeout, async {
            tokio::process::Command::new(&self.binary)
                .arg(image_path)
                .arg("stdout")
                .arg("-l")
                .arg(&self.language)
                .kill_on_drop(true)
                .output()
                .await
        })
        .await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(SignalError::Recognition(format!(
                    "failed to run {}: {e}",
                    self.binary
                )));
            }
            Err(_) => {
                return Err(SignalError::Recognition(format!(
                    "{} timed out after {}s",
                    self.binary,
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SignalError::Recognition(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "OCR finished");
        Ok(text)
    }
}
