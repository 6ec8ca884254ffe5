//! sse-tap - a transparent Server-Sent-Events tap over a fetch capability
//!
//! An [`Interceptor`] wraps any [`Fetch`](traits::Fetch). Responses whose
//! `Content-Type` marks them as an event stream have their body split in two
//! with [`tee`]: one half goes back to the caller untouched, the other is
//! decoded into SSE `data:` records and reported as [`Signal`]s through a
//! [`Reporter`](traits::Reporter).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod models;
pub mod signal;
pub mod sse;
pub mod tee;
pub mod traits;

pub use config::TapConfig;
pub use error::{DecodeError, FetchError, TapError, TapResult};
pub use interceptor::Interceptor;
pub use signal::{parse_tag_line, Signal, SignalKind, TapId};
pub use tee::{tee, TeeStream};
