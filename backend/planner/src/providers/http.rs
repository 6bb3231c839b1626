use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use signalbot_core::{Result, SignalError, TextGenerator};

/// Query parameter that carries the prompt.
const PROMPT_PARAM: &str = "ask";

/// Plain-text generation endpoint queried with `GET <url>?ask=<prompt>`.
///
/// No authentication is sent; the endpoint is whatever the operator
/// configures.
pub struct HttpTextGenerator {
    client: Client,
    endpoint: String,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("signalbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SignalError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, "Sending prompt to text endpoint");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(PROMPT_PARAM, prompt)])
            .send()
            .await
            .map_err(|e| SignalError::Advisory(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Advisory(format!("endpoint returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SignalError::Advisory(format!("failed to read body: {e}")))?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Text endpoint responded"
        );
        Ok(body)
    }
}
