//! Structured logging for SignalBot.
//!
//! Handles subscriber setup, optional NDJSON file rotation, secret redaction,
//! and per-request pipeline events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, RequestEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
