//! Digit extraction from recognized text.
//!
//! A token counts when it is a single ASCII digit with no word character on
//! either side, so `7` in "7 3 9" matches while "73", "x7" and "7a" do not.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use signalbot_core::{DigitSequence, Result, TextRecognizer};
use tracing::debug;

static DIGIT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9](?-u:\b)").unwrap());

/// Scan `text` for standalone digits, keeping the most recent ten.
pub fn scan_digits(text: &str) -> DigitSequence {
    let digits: Vec<u8> = DIGIT_TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().as_bytes()[0] - b'0')
        .collect();
    // Every match is a single ASCII digit, so validation cannot fail.
    DigitSequence::new(digits).unwrap_or_default()
}

/// Runs OCR on an image file and returns the digits it contains.
#[derive(Clone)]
pub struct DigitExtractor {
    recognizer: Arc<dyn TextRecognizer>,
}

impl DigitExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Fails only when recognition itself fails; no digits is an empty
    /// sequence. The caller owns `image_path` and its cleanup.
    pub async fn extract(&self, image_path: &Path) -> Result<DigitSequence> {
        let text = self.recognizer.recognize(image_path).await?;
        let digits = scan_digits(&text);
        debug!(
            engine = self.recognizer.name(),
            found = digits.len(),
            "Digits extracted"
        );
        Ok(digits)
    }
}
