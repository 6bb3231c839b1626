//! Per-message flow shared by every chat transport.
//!
//! An image request runs Download → Extract → threshold check → Predict and
//! always ends in exactly one reply. Nothing is kept between requests.

use std::path::PathBuf;
use std::sync::Arc;

use signalbot_core::{
    ChatReply, ChatRequest, DigitSequence, Forecast, ImageSource, MIN_DIGITS, PredictionStrategy,
    ReplyKind, Result, SignalError,
};
use signalbot_logging::{EventLogger, RequestEvent};
use signalbot_understanding::DigitExtractor;
use tracing::{info, warn};

use crate::commands::BotCommand;
use crate::replies;
use crate::temp_image::TempImage;

pub struct SignalPipeline {
    extractor: DigitExtractor,
    strategy: Arc<dyn PredictionStrategy>,
    temp_dir: PathBuf,
}

impl SignalPipeline {
    pub fn new(
        extractor: DigitExtractor,
        strategy: Arc<dyn PredictionStrategy>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            strategy,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Reply to a text message, or `None` when it is not a known command.
    pub fn handle_text(&self, request: &ChatRequest, text: &str) -> Option<ChatReply> {
        let command = BotCommand::parse(text)?;
        info!(chat_id = request.chat_id, command = ?command, "Command received");
        Some(ChatReply::new(request, ReplyKind::Usage, replies::USAGE_TEXT))
    }

    /// Run the full image flow. Every failure becomes a reply.
    pub async fn handle_image(&self, request: &ChatRequest, source: &dyn ImageSource) -> ChatReply {
        EventLogger::log_event(
            request.request_id,
            RequestEvent::ImageReceived {
                chat_id: request.chat_id,
            },
        );

        let reply = match self.run(request, source).await {
            Ok((digits, forecast)) => ChatReply::new(
                request,
                ReplyKind::Prediction,
                replies::format_forecast(&digits, &forecast),
            ),
            Err(SignalError::InsufficientEvidence { found, required }) => {
                info!(found, required, "Not enough digits for a prediction");
                ChatReply::new(
                    request,
                    ReplyKind::InsufficientEvidence,
                    replies::INSUFFICIENT_EVIDENCE_TEXT,
                )
            }
            Err(e) => {
                warn!(chat_id = request.chat_id, error = %e, "Image request failed");
                EventLogger::log_event(
                    request.request_id,
                    RequestEvent::Failed {
                        stage: failed_stage(&e).to_string(),
                        error_msg: e.to_string(),
                    },
                );
                ChatReply::new(
                    request,
                    ReplyKind::ProcessingError,
                    replies::PROCESSING_ERROR_TEXT,
                )
            }
        };

        EventLogger::log_event(
            request.request_id,
            RequestEvent::Replied {
                kind: format!("{:?}", reply.kind),
            },
        );
        reply
    }

    async fn run(
        &self,
        request: &ChatRequest,
        source: &dyn ImageSource,
    ) -> Result<(DigitSequence, Forecast)> {
        let bytes = source.fetch().await?;

        let digits = {
            let image = TempImage::write(&self.temp_dir, request.request_id, &bytes).await?;
            self.extractor.extract(image.path()).await?
        };

        EventLogger::log_event(
            request.request_id,
            RequestEvent::DigitsExtracted {
                digits: digits.digits().to_vec(),
            },
        );

        digits.require(MIN_DIGITS)?;

        let forecast = self.strategy.forecast(&digits).await?;
        let (label, confidence) = match &forecast {
            Forecast::Heuristic(result) => (
                Some(result.predicted_label.to_string()),
                Some(result.confidence),
            ),
            Forecast::Remote { advice } => (Some(format!("{advice:?}")), None),
        };
        EventLogger::log_event(
            request.request_id,
            RequestEvent::Forecast {
                strategy: self.strategy.name().to_string(),
                label,
                confidence,
            },
        );

        Ok((digits, forecast))
    }
}

fn failed_stage(error: &SignalError) -> &'static str {
    match error {
        SignalError::Download(_) => "download",
        SignalError::Recognition(_) => "extract",
        _ => "predict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use signalbot_core::{Advice, Label, TextRecognizer};
    use signalbot_planner::PredictionEngine;
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed text and records every path it was asked to read,
    /// checking the file is present at that moment.
    struct FakeOcr {
        text: Option<&'static str>,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl FakeOcr {
        fn reading(text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                text: Some(text),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn broken() -> Arc<Self> {
            Arc::new(Self {
                text: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<PathBuf> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextRecognizer for FakeOcr {
        fn name(&self) -> &str {
            "fake"
        }

        async fn recognize(&self, image_path: &Path) -> Result<String> {
            assert!(image_path.exists(), "image must exist during OCR");
            self.seen.lock().unwrap().push(image_path.to_path_buf());
            // Yield so concurrent requests overlap.
            tokio::task::yield_now().await;
            self.text
                .map(str::to_string)
                .ok_or_else(|| SignalError::Recognition("tesseract exited with 1".into()))
        }
    }

    struct CountingStrategy {
        inner: Arc<dyn PredictionStrategy>,
        calls: AtomicUsize,
    }

    impl CountingStrategy {
        fn wrap(inner: Arc<dyn PredictionStrategy>) -> Arc<Self> {
            Arc::new(Self {
                inner,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PredictionStrategy for CountingStrategy {
        fn name(&self) -> &str {
            self.inner.name()
        }

        async fn forecast(&self, digits: &DigitSequence) -> Result<Forecast> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.forecast(digits).await
        }
    }

    /// Always answers with a fixed advice, like a remote endpoint would.
    struct FixedAdvice(Advice);

    #[async_trait]
    impl PredictionStrategy for FixedAdvice {
        fn name(&self) -> &str {
            "remote"
        }

        async fn forecast(&self, _digits: &DigitSequence) -> Result<Forecast> {
            Ok(Forecast::Remote { advice: self.0 })
        }
    }

    struct StaticImage;

    #[async_trait]
    impl ImageSource for StaticImage {
        async fn fetch(&self) -> Result<Bytes> {
            Ok(Bytes::from_static(b"\xff\xd8\xff\xe0 fake jpeg"))
        }
    }

    struct UnreachableImage;

    #[async_trait]
    impl ImageSource for UnreachableImage {
        async fn fetch(&self) -> Result<Bytes> {
            Err(SignalError::Download("getFile returned 400".into()))
        }
    }

    fn pipeline(
        ocr: Arc<FakeOcr>,
        strategy: Arc<dyn PredictionStrategy>,
        dir: &Path,
    ) -> SignalPipeline {
        SignalPipeline::new(DigitExtractor::new(ocr), strategy, dir)
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_prediction_reply_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("1 2 3 4 6\n7 8 9 0 1");
        let strategy = CountingStrategy::wrap(Arc::new(PredictionEngine::new()));
        let p = pipeline(ocr.clone(), strategy.clone(), dir.path());

        let request = ChatRequest::new(7);
        let reply = p.handle_image(&request, &StaticImage).await;

        assert_eq!(reply.chat_id, 7);
        assert_eq!(reply.kind, ReplyKind::Prediction);
        assert!(reply.text.contains("1, 2, 3, 4, 6, 7, 8, 9, 0, 1"));
        assert!(reply.text.contains("<b>Small</b>"));
        // 6 Small of 10, damped by the trailing 0, 1 streak.
        assert!(reply.text.contains("48.0%"));
        assert_eq!(strategy.calls(), 1);
        assert_eq!(ocr.seen().len(), 1);
        assert!(!ocr.seen()[0].exists());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_too_few_digits_skips_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("Result 3 then 8 and 1 (2024)");
        let strategy = CountingStrategy::wrap(Arc::new(PredictionEngine::new()));
        let p = pipeline(ocr, strategy.clone(), dir.path());

        let reply = p.handle_image(&ChatRequest::new(1), &StaticImage).await;

        assert_eq!(reply.kind, ReplyKind::InsufficientEvidence);
        assert_eq!(reply.text, replies::INSUFFICIENT_EVIDENCE_TEXT);
        assert_eq!(strategy.calls(), 0);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_ocr_failure_replies_error_and_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::broken();
        let strategy = CountingStrategy::wrap(Arc::new(PredictionEngine::new()));
        let p = pipeline(ocr.clone(), strategy.clone(), dir.path());

        let reply = p.handle_image(&ChatRequest::new(1), &StaticImage).await;

        assert_eq!(reply.kind, ReplyKind::ProcessingError);
        assert_eq!(reply.text, replies::PROCESSING_ERROR_TEXT);
        assert_eq!(strategy.calls(), 0);
        let seen = ocr.seen();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_download_failure_skips_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("1 2 3 4 5");
        let p = pipeline(ocr.clone(), Arc::new(PredictionEngine::new()), dir.path());

        let reply = p.handle_image(&ChatRequest::new(1), &UnreachableImage).await;

        assert_eq!(reply.kind, ReplyKind::ProcessingError);
        assert!(ocr.seen().is_empty());
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_remote_unknown_is_reported_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("5 5 5 5 5 5");
        let p = pipeline(ocr, Arc::new(FixedAdvice(Advice::Unknown)), dir.path());

        let reply = p.handle_image(&ChatRequest::new(1), &StaticImage).await;

        assert_eq!(reply.kind, ReplyKind::Prediction);
        assert!(reply.text.contains(replies::UNKNOWN_SIGNAL_TEXT));
    }

    #[tokio::test]
    async fn test_remote_label_reply() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("0 1 2 3 4");
        let p = pipeline(
            ocr,
            Arc::new(FixedAdvice(Advice::Signal(Label::Big))),
            dir.path(),
        );

        let reply = p.handle_image(&ChatRequest::new(1), &StaticImage).await;
        assert_eq!(reply.text, "🔮 Signal → <b>Big</b>");
    }

    #[tokio::test]
    async fn test_concurrent_requests_use_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = FakeOcr::reading("1 2 3 4 5 6");
        let p = pipeline(ocr.clone(), Arc::new(PredictionEngine::new()), dir.path());

        let (a, b) = (ChatRequest::new(1), ChatRequest::new(2));
        let (ra, rb) = tokio::join!(
            p.handle_image(&a, &StaticImage),
            p.handle_image(&b, &StaticImage)
        );

        assert_eq!(ra.chat_id, 1);
        assert_eq!(rb.chat_id, 2);
        let seen = ocr.seen();
        assert_eq!(seen.len(), 2);
        assert_ne!(seen[0], seen[1]);
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_greeting_commands_get_usage() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(FakeOcr::reading(""), Arc::new(PredictionEngine::new()), dir.path());
        let request = ChatRequest::new(9);

        let reply = p.handle_text(&request, "/start").unwrap();
        assert_eq!(reply.kind, ReplyKind::Usage);
        assert_eq!(reply.text, replies::USAGE_TEXT);
        assert!(p.handle_text(&request, "/help").is_some());
        assert!(p.handle_text(&request, "what's next?").is_none());
    }
}
