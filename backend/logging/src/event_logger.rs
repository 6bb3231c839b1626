//! Request Event Logger
//!
//! One structured record per pipeline stage of an image request, emitted
//! under the `signal_events` target so it can be filtered on its own.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    ImageReceived {
        chat_id: i64,
    },
    DigitsExtracted {
        digits: Vec<u8>,
    },
    Forecast {
        strategy: String,
        label: Option<String>,
        confidence: Option<f64>,
    },
    Replied {
        kind: String,
    },
    Failed {
        stage: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: RequestEvent,
}

impl EventLogEntry {
    /// Builds the entry, scrubbing free-text error messages.
    pub fn new(request_id: Uuid, mut event: RequestEvent) -> Self {
        if let RequestEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        Self {
            request_id,
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    pub fn log_event(request_id: Uuid, event: RequestEvent) {
        let entry = EventLogEntry::new(request_id, event);
        info!(target: "signal_events", request_id = %entry.request_id, event = ?entry.event, "Request event");
    }
}
