//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestFetch`] - fetch over reqwest
//! - [`ChannelReporter`] - signals into a tokio channel
//! - [`TracingReporter`] - signals as tag lines in the tracing log
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockFetch`] - scripted responses per URL
//! - [`mock::RecordingReporter`] - in-memory signal record

pub mod channel_reporter;
pub mod mock;
pub mod reqwest_fetch;
pub mod tracing_reporter;

pub use channel_reporter::{create_signal_channel, ChannelReporter, SignalReceiver};
pub use mock::{MockFetch, MockResponse, RecordingReporter};
pub use reqwest_fetch::ReqwestFetch;
pub use tracing_reporter::TracingReporter;
