//! Error handling for sse-tap.
//!
//! Failures stay local to the part of the system that detects them:
//!
//! | Kind | Type | Where it goes |
//! |------|------|---------------|
//! | Upstream fetch failure | [`FetchError`] | reported, then returned to the caller unchanged |
//! | Decode failure | [`DecodeError`] | reported once as `stream-error`, ends the decoder task |
//! | Malformed record | none | dropped silently |
//!
//! [`TapError`] unifies these with configuration errors for code paths that
//! can hit more than one of them (the binary, config loading).

mod decode;
mod fetch;

pub use decode::DecodeError;
pub use fetch::{classify_reqwest_error, FetchError};

use thiserror::Error;

/// Unified error type for sse-tap.
#[derive(Debug, Error)]
pub enum TapError {
    /// Upstream fetch failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Decoder failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid configuration value.
    #[error("invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl TapError {
    /// Build a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        TapError::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TapError::Fetch(err) => err.error_code(),
            TapError::Decode(err) => err.error_code(),
            TapError::Config { .. } => "E_CONFIG",
        }
    }
}

/// Type alias for Results using [`TapError`].
pub type TapResult<T> = Result<T, TapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let fetch: TapError = FetchError::Cancelled.into();
        let decode: TapError = DecodeError::InvalidUtf8 { offset: 0 }.into();
        let config = TapError::config("SSE_TAP_STRICT_UTF8", "expected a boolean");

        assert_eq!(fetch.error_code(), "E_FETCH_CANCEL");
        assert_eq!(decode.error_code(), "E_DECODE_UTF8");
        assert_eq!(config.error_code(), "E_CONFIG");

        assert_eq!(fetch.to_string(), "Request cancelled");
        assert_eq!(
            config.to_string(),
            "invalid configuration for SSE_TAP_STRICT_UTF8: expected a boolean"
        );
    }
}
