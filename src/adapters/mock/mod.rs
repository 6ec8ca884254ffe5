//! Mock implementations for testing.
//!
//! - [`MockFetch`] - fetch with scripted responses and request recording
//! - [`RecordingReporter`] - reporter keeping every signal in memory

pub mod fetch;
pub mod reporter;

pub use fetch::{MockFetch, MockResponse};
pub use reporter::RecordingReporter;
