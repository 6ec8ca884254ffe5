//! SSE (Server-Sent Events) stream decoder
//!
//! Rebuilds event records from a chunked byte stream. Only the `data:`
//! field is read; a record is the text before a blank line (`"\n\n"`).
//!
//! # Module structure
//! - `utf8` - stateful UTF-8 decoding across chunk boundaries
//! - `record` - record buffer and `data:` extraction
//! - `decoder` - the `Streaming -> Closed | Failed` state machine
//! - `task` - the async read loop feeding the state machine

mod decoder;
mod record;
mod task;
mod utf8;

pub use decoder::{DecoderState, SseDecoder, Trigger};
pub use record::{extract_data, RecordBuffer, DATA_PREFIX, RECORD_BOUNDARY};
pub use task::{decode_stream, spawn_decoder};
pub use utf8::Utf8Decoder;
