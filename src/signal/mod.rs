//! Reporting-channel signals.
//!
//! A tapped stream produces, in order: one `stream-opened`, zero or more
//! `event-received`, then exactly one of `stream-closed` or `stream-error`.
//! A failed upstream fetch produces a lone `stream-error`.

mod tag_line;

pub use tag_line::{parse_tag_line, DEFAULT_TAG_PREFIX};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier tying together all signals from one tapped response.
pub type TapId = Uuid;

/// One signal on the reporting channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// When the signal was produced
    pub timestamp: DateTime<Utc>,
    /// Tapped response (or failed fetch) this signal belongs to
    pub tap_id: TapId,
    /// What happened
    pub kind: SignalKind,
}

impl Signal {
    /// Create a signal stamped with the current time.
    pub fn new(tap_id: TapId, kind: SignalKind) -> Self {
        Self {
            timestamp: Utc::now(),
            tap_id,
            kind,
        }
    }
}

/// The four signal tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// An event-stream response was tapped.
    StreamOpened,
    /// The decoder reached the natural end of the stream.
    StreamClosed,
    /// One decoded SSE event: the joined `data:` payload.
    EventReceived { data: String },
    /// A read, decode or upstream fetch failure.
    StreamError { message: String },
}

impl SignalKind {
    pub fn event(data: impl Into<String>) -> Self {
        SignalKind::EventReceived { data: data.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SignalKind::StreamError {
            message: message.into(),
        }
    }

    /// The tag name used in the reporting-channel table.
    pub fn tag(&self) -> &'static str {
        match self {
            SignalKind::StreamOpened => "stream-opened",
            SignalKind::StreamClosed => "stream-closed",
            SignalKind::EventReceived { .. } => "event-received",
            SignalKind::StreamError { .. } => "stream-error",
        }
    }

    /// The payload carried by this signal, if any.
    pub fn payload(&self) -> Option<&str> {
        match self {
            SignalKind::EventReceived { data } => Some(data),
            SignalKind::StreamError { message } => Some(message),
            SignalKind::StreamOpened | SignalKind::StreamClosed => None,
        }
    }

    /// Whether no further signals follow for the same tap.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SignalKind::StreamClosed | SignalKind::StreamError { .. }
        )
    }
}
