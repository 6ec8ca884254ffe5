//! Incremental SSE decoder state machine.
//!
//! ```text
//!              ChunkArrived
//!              ┌──────────┐
//!              ▼          │
//!         ┌───────────┐───┘
//!         │ Streaming │
//!         └───────────┘
//!   EndReached │   │ ErrorRaised / bad chunk
//!              ▼   ▼
//!         Closed   Failed
//! ```
//!
//! The machine is synchronous; the async read loop in [`super::task`] maps
//! stream items to [`Trigger`]s and forwards the resulting signals.

use bytes::Bytes;
use tracing::{debug, warn};

use super::record::{extract_data, RecordBuffer};
use super::utf8::Utf8Decoder;
use crate::error::DecodeError;
use crate::signal::SignalKind;

/// Decoder lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Reading chunks.
    Streaming,
    /// Source ended normally.
    Closed,
    /// A read or decode error ended decoding.
    Failed,
}

impl DecoderState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, DecoderState::Streaming)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecoderState::Streaming => "streaming",
            DecoderState::Closed => "closed",
            DecoderState::Failed => "failed",
        }
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// The source produced a chunk.
    ChunkArrived(Bytes),
    /// The source signalled completion.
    EndReached,
    /// Reading the source failed.
    ErrorRaised(DecodeError),
}

/// Turns a chunked byte stream into SSE event payloads.
#[derive(Debug)]
pub struct SseDecoder {
    state: DecoderState,
    text: Utf8Decoder,
    records: RecordBuffer,
    events: u64,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new(false)
    }
}

impl SseDecoder {
    /// Create a decoder. With `strict_utf8` invalid UTF-8 fails the stream
    /// instead of being replaced with U+FFFD.
    pub fn new(strict_utf8: bool) -> Self {
        Self {
            state: DecoderState::Streaming,
            text: Utf8Decoder::new(strict_utf8),
            records: RecordBuffer::new(),
            events: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Events emitted so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Decoded text waiting for a record boundary.
    pub fn buffered(&self) -> &str {
        self.records.as_str()
    }

    /// Apply one trigger and return the signals it produces, in order.
    ///
    /// Triggers arriving after a terminal state are ignored.
    pub fn handle(&mut self, trigger: Trigger) -> Vec<SignalKind> {
        if self.state.is_terminal() {
            debug!(state = self.state.as_str(), "trigger after terminal state ignored");
            return Vec::new();
        }

        match trigger {
            Trigger::ChunkArrived(chunk) => match self.feed(&chunk) {
                Ok(events) => events.into_iter().map(SignalKind::event).collect(),
                Err(err) => vec![self.fail(err)],
            },
            Trigger::EndReached => {
                let discarded = self.records.discard();
                if discarded > 0 {
                    debug!(bytes = discarded, "dropping unterminated trailing record");
                }
                self.state = DecoderState::Closed;
                vec![SignalKind::StreamClosed]
            }
            Trigger::ErrorRaised(err) => vec![self.fail(err)],
        }
    }

    /// Decode one chunk and return every event it completes.
    ///
    /// All boundaries present after appending the chunk are resolved before
    /// returning, so a chunk carrying several records yields all of them.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, DecodeError> {
        if self.state.is_terminal() {
            return Err(DecodeError::Terminated {
                state: self.state.as_str(),
            });
        }

        let text = self.text.decode(chunk)?;
        self.records.push_str(&text);

        let mut events = Vec::new();
        while let Some(record) = self.records.next_record() {
            if let Some(data) = extract_data(&record) {
                events.push(data);
            }
        }
        self.events += events.len() as u64;
        debug!(
            bytes = chunk.len(),
            events = events.len(),
            buffered = self.records.len(),
            "chunk decoded"
        );
        Ok(events)
    }

    fn fail(&mut self, err: DecodeError) -> SignalKind {
        warn!(code = err.error_code(), error = %err, "sse decode failed");
        self.state = DecoderState::Failed;
        SignalKind::error(err.to_string())
    }
}
