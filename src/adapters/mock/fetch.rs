//! Mock fetch for testing.
//!
//! Returns scripted responses per URL and records every request, so tests
//! can check both what the interceptor forwarded and what it handed back.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::EVENT_STREAM_MEDIA_TYPE;
use crate::error::FetchError;
use crate::models::{ByteStream, FetchRequest, FetchResponse, ResponseParts};
use crate::traits::Fetch;

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Resolve with these parts and a body yielding these chunks.
    Chunks {
        parts: ResponseParts,
        chunks: Vec<Bytes>,
    },
    /// Resolve, then fail the body read after the given chunks.
    ChunksThenError {
        parts: ResponseParts,
        chunks: Vec<Bytes>,
        error: FetchError,
    },
    /// Fail the fetch itself.
    Error(FetchError),
}

impl MockResponse {
    /// A `200 OK` response with the given content type and body chunks.
    pub fn with_content_type(content_type: &str, chunks: &[&str]) -> Self {
        MockResponse::Chunks {
            parts: parts_with_content_type(200, "OK", content_type),
            chunks: to_bytes(chunks),
        }
    }

    /// A `200 OK` `text/event-stream` response.
    pub fn event_stream(chunks: &[&str]) -> Self {
        Self::with_content_type(EVENT_STREAM_MEDIA_TYPE, chunks)
    }

    /// A `200 OK` `text/event-stream` response whose body fails after `chunks`.
    pub fn event_stream_then_error(chunks: &[&str], error: FetchError) -> Self {
        MockResponse::ChunksThenError {
            parts: parts_with_content_type(200, "OK", EVENT_STREAM_MEDIA_TYPE),
            chunks: to_bytes(chunks),
            error,
        }
    }

    /// A `200 OK` `application/json` response.
    pub fn json(body: &str) -> Self {
        Self::with_content_type("application/json", &[body])
    }

    fn into_response(self) -> Result<FetchResponse, FetchError> {
        match self {
            MockResponse::Chunks { parts, chunks } => Ok(FetchResponse::from_chunks(parts, chunks)),
            MockResponse::ChunksThenError {
                parts,
                chunks,
                error,
            } => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(error)));
                let body: ByteStream = Box::pin(stream::iter(items));
                Ok(FetchResponse::from_parts(parts, body))
            }
            MockResponse::Error(err) => Err(err),
        }
    }
}

fn parts_with_content_type(status: u16, status_text: &str, content_type: &str) -> ResponseParts {
    let mut parts = ResponseParts::new(status, status_text);
    if let Ok(value) = HeaderValue::from_str(content_type) {
        parts.headers.insert(CONTENT_TYPE, value);
    }
    parts
}

fn to_bytes(chunks: &[&str]) -> Vec<Bytes> {
    chunks
        .iter()
        .map(|chunk| Bytes::copy_from_slice(chunk.as_bytes()))
        .collect()
}

/// Mock fetch for testing.
///
/// # Example
///
/// ```ignore
/// use sse_tap::adapters::mock::{MockFetch, MockResponse};
///
/// let fetch = MockFetch::new();
/// fetch.set_response(
///     "https://example.com/events",
///     MockResponse::event_stream(&["data: hi\n\n"]),
/// );
///
/// let response = fetch.fetch(FetchRequest::get("https://example.com/events")).await?;
/// assert_eq!(fetch.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFetch {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Response when no URL matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL. Matched exactly first, then by prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        match self.get_response(&url) {
            Some(response) => response.into_response(),
            None => Err(FetchError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_event_stream_response() {
        let fetch = MockFetch::new();
        fetch.set_response(
            "https://example.com/events",
            MockResponse::event_stream(&["data: 1\n\n", "data: 2\n\n"]),
        );

        let response = fetch
            .fetch(FetchRequest::get("https://example.com/events"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.content_type(), Some("text/event-stream"));
        assert_eq!(
            response.bytes().await.unwrap(),
            Bytes::from("data: 1\n\ndata: 2\n\n")
        );
    }

    #[tokio::test]
    async fn test_error_response() {
        let fetch = MockFetch::new();
        fetch.set_response(
            "https://example.com/down",
            MockResponse::Error(FetchError::ConnectionFailed {
                url: "https://example.com/down".to_string(),
                message: "refused".to_string(),
            }),
        );

        let err = fetch
            .fetch(FetchRequest::get("https://example.com/down"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ConnectionFailed { .. }));
    }

    #[tokio::test]
    async fn test_body_error_after_chunks() {
        let fetch = MockFetch::new();
        fetch.set_default_response(MockResponse::event_stream_then_error(
            &["data: 1\n\n"],
            FetchError::Io("reset".to_string()),
        ));

        let mut body = fetch
            .fetch(FetchRequest::get("https://example.com/any"))
            .await
            .unwrap()
            .into_body();
        assert_eq!(body.next().await, Some(Ok(Bytes::from("data: 1\n\n"))));
        assert_eq!(body.next().await, Some(Err(FetchError::Io("reset".to_string()))));
        assert_eq!(body.next().await, None);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let fetch = MockFetch::new();
        let result = fetch.fetch(FetchRequest::get("https://example.com/missing")).await;
        assert!(matches!(result, Err(FetchError::Other(_))));
    }

    #[tokio::test]
    async fn test_prefix_match_and_recording() {
        let fetch = MockFetch::new();
        fetch.set_response("https://example.com/api", MockResponse::json("{}"));

        let request = FetchRequest::post("https://example.com/api/v1/chat")
            .with_header("Authorization", "Bearer t")
            .with_body("{}");
        fetch.fetch(request).await.unwrap();

        let requests = fetch.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://example.com/api/v1/chat");
        assert_eq!(requests[0].headers.get("authorization").unwrap(), "Bearer t");

        fetch.clear_requests();
        assert!(fetch.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let fetch = MockFetch::new();
        fetch.set_default_response(MockResponse::json("{}"));
        let cloned = fetch.clone();
        cloned.fetch(FetchRequest::get("https://example.com")).await.unwrap();
        assert_eq!(fetch.get_requests().len(), 1);
    }
}
