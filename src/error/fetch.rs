//! Upstream fetch error types.
//!
//! These errors come from the wrapped fetch capability. The interceptor never
//! recovers or rewrites them: whatever the inner fetch returns is what the
//! caller sees.

use thiserror::Error;

/// Failure of the underlying fetch, or of a read from its response body.
///
/// The type is `Clone` so a mid-stream read failure can be delivered to both
/// halves of a teed body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection to the server failed.
    #[error("Connection failed to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Request or body read timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server answered with a status the fetch implementation treats as an error.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Request was aborted before it settled.
    #[error("Request cancelled")]
    Cancelled,

    /// Body read failure.
    #[error("IO error: {0}")]
    Io(String),

    /// The request URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Anything else.
    #[error("Fetch error: {0}")]
    Other(String),
}

impl FetchError {
    /// Check if this error is likely transient.
    ///
    /// Nothing in this crate retries; the flag is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::ConnectionFailed { .. } => true,
            FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            FetchError::Io(_) => true,
            FetchError::Cancelled | FetchError::InvalidUrl(_) | FetchError::Other(_) => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::ConnectionFailed { .. } => "E_FETCH_CONN",
            FetchError::Timeout(_) => "E_FETCH_TIMEOUT",
            FetchError::Status { .. } => "E_FETCH_STATUS",
            FetchError::Cancelled => "E_FETCH_CANCEL",
            FetchError::Io(_) => "E_FETCH_IO",
            FetchError::InvalidUrl(_) => "E_FETCH_URL",
            FetchError::Other(_) => "E_FETCH_OTHER",
        }
    }
}

/// Classify a reqwest error into a [`FetchError`].
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if err.is_connect() {
        FetchError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else if let Some(status) = err.status() {
        FetchError::Status {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        FetchError::Io(err.to_string())
    } else {
        FetchError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::ConnectionFailed {
                url: "http://localhost:1".to_string(),
                message: "refused".to_string()
            }
            .to_string(),
            "Connection failed to 'http://localhost:1': refused"
        );
        assert_eq!(
            FetchError::Timeout("30s".to_string()).to_string(),
            "Request timeout: 30s"
        );
        assert_eq!(
            FetchError::Status {
                status: 502,
                message: "Bad Gateway".to_string()
            }
            .to_string(),
            "Server error (502): Bad Gateway"
        );
        assert_eq!(FetchError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            FetchError::Io("reset".to_string()).to_string(),
            "IO error: reset"
        );
        assert_eq!(
            FetchError::InvalidUrl("nope".to_string()).to_string(),
            "Invalid URL: nope"
        );
        assert_eq!(
            FetchError::Other("boom".to_string()).to_string(),
            "Fetch error: boom"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Timeout("x".to_string()).is_retryable());
        assert!(FetchError::Io("x".to_string()).is_retryable());
        assert!(FetchError::Status {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(FetchError::Status {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!FetchError::Status {
            status: 404,
            message: String::new()
        }
        .is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
        assert!(!FetchError::InvalidUrl("x".to_string()).is_retryable());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            FetchError::ConnectionFailed {
                url: String::new(),
                message: String::new(),
            }
            .error_code(),
            FetchError::Timeout(String::new()).error_code(),
            FetchError::Status {
                status: 500,
                message: String::new(),
            }
            .error_code(),
            FetchError::Cancelled.error_code(),
            FetchError::Io(String::new()).error_code(),
            FetchError::InvalidUrl(String::new()).error_code(),
            FetchError::Other(String::new()).error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[tokio::test]
    async fn test_classify_connection_refused() {
        let url = "http://127.0.0.1:59998/stream";
        let err = reqwest::Client::new()
            .get(url)
            .send()
            .await
            .expect_err("nothing listens on this port");
        let classified = classify_reqwest_error(&err, url);
        assert!(matches!(
            classified,
            FetchError::ConnectionFailed { .. } | FetchError::Other(_)
        ));
    }
}
