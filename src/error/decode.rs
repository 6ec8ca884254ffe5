//! Decoder-side error types.
//!
//! Everything here stays inside the decoder task. A decode error is reported
//! once on the reporting channel and ends that task; it never reaches the
//! caller holding the other half of the stream.

use thiserror::Error;

use super::fetch::FetchError;

/// Failure while reading or decoding the tapped copy of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Reading the next chunk from the tapped stream failed.
    #[error("stream read failed: {0}")]
    Read(#[from] FetchError),

    /// Strict decoding hit a byte sequence that is not UTF-8.
    #[error("invalid UTF-8 at byte {offset} of chunk")]
    InvalidUtf8 { offset: usize },

    /// Input was fed to a decoder that already reached a terminal state.
    #[error("decoder already {state}")]
    Terminated { state: &'static str },
}

impl DecodeError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DecodeError::Read(_) => "E_DECODE_READ",
            DecodeError::InvalidUtf8 { .. } => "E_DECODE_UTF8",
            DecodeError::Terminated { .. } => "E_DECODE_TERMINATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::Read(FetchError::Io("reset by peer".to_string())).to_string(),
            "stream read failed: IO error: reset by peer"
        );
        assert_eq!(
            DecodeError::InvalidUtf8 { offset: 3 }.to_string(),
            "invalid UTF-8 at byte 3 of chunk"
        );
        assert_eq!(
            DecodeError::Terminated { state: "closed" }.to_string(),
            "decoder already closed"
        );
    }

    #[test]
    fn test_from_fetch_error() {
        let err: DecodeError = FetchError::Cancelled.into();
        assert_eq!(err, DecodeError::Read(FetchError::Cancelled));
        assert_eq!(err.error_code(), "E_DECODE_READ");
    }
}
