use async_trait::async_trait;
use signalbot_core::{Result, SignalError, TextGenerator};

/// A text generator that returns a canned response or a canned failure.
pub struct MockGenerator {
    fixed_response: Option<String>,
}

impl MockGenerator {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            fixed_response: Some(response.into()),
        }
    }

    /// Every call fails with an advisory error.
    pub fn failing() -> Self {
        Self {
            fixed_response: None,
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.fixed_response
            .clone()
            .ok_or_else(|| SignalError::Advisory("mock endpoint unavailable".into()))
    }
}
