//! Fetch response with a streaming body.

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE};

use crate::error::FetchError;

/// A readable byte stream, as produced by the fetch capability.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

/// Everything about a response except its body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseParts {
    /// HTTP status code
    pub status: u16,
    /// Status text as reported by the fetch implementation
    pub status_text: String,
    /// Response headers
    pub headers: HeaderMap,
}

impl ResponseParts {
    /// Create parts with no headers.
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: HeaderMap::new(),
        }
    }
}

/// Response returned by a [`Fetch`](crate::traits::Fetch) implementation.
pub struct FetchResponse {
    parts: ResponseParts,
    body: ByteStream,
}

impl FetchResponse {
    /// Create a response from its parts and a body stream.
    pub fn from_parts(parts: ResponseParts, body: ByteStream) -> Self {
        Self { parts, body }
    }

    /// Create a response whose body yields the given chunks in order.
    pub fn from_chunks(parts: ResponseParts, chunks: Vec<Bytes>) -> Self {
        let body = futures::stream::iter(chunks.into_iter().map(Ok));
        Self::from_parts(parts, Box::pin(body))
    }

    /// Split into parts and body.
    pub fn into_parts(self) -> (ResponseParts, ByteStream) {
        (self.parts, self.body)
    }

    pub fn parts(&self) -> &ResponseParts {
        &self.parts
    }

    pub fn status(&self) -> u16 {
        self.parts.status
    }

    pub fn status_text(&self) -> &str {
        &self.parts.status_text
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// The `Content-Type` header, if present and readable as text.
    pub fn content_type(&self) -> Option<&str> {
        self.parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.parts.status)
    }

    /// Take the body stream, leaving the parts.
    pub fn into_body(self) -> ByteStream {
        self.body
    }

    /// Drain the body into one buffer.
    pub async fn bytes(self) -> Result<Bytes, FetchError> {
        let mut body = self.body;
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Drain the body and decode it as UTF-8, replacing invalid sequences.
    pub async fn text(self) -> Result<String, FetchError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("parts", &self.parts)
            .field("body", &"<stream>")
            .finish()
    }
}
