//! Trait abstractions for dependency injection and testability.
//!
//! - [`Fetch`] - the network-fetch capability the interceptor decorates
//! - [`Reporter`] - the reporting channel decoded signals are sent to

pub mod fetch;
pub mod reporter;

pub use fetch::{fetch_fn, Fetch, FnFetch};
pub use reporter::{NullReporter, Reporter};
