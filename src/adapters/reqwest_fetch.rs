//! Reqwest-based fetch adapter.
//!
//! Production implementation of [`Fetch`]. The response body is exposed as
//! reqwest's chunk stream, so nothing is buffered before the caller (or the
//! tap) reads it.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::error::{classify_reqwest_error, FetchError};
use crate::models::{FetchRequest, FetchResponse, ResponseParts};
use crate::traits::Fetch;

/// Fetch implementation using reqwest.
///
/// Non-2xx statuses are returned as responses, not errors, the same way a
/// browser fetch resolves them.
///
/// # Example
///
/// ```ignore
/// use sse_tap::adapters::ReqwestFetch;
/// use sse_tap::models::FetchRequest;
/// use sse_tap::traits::Fetch;
///
/// let fetch = ReqwestFetch::new();
/// let response = fetch.fetch(FetchRequest::get("https://example.com/events")).await?;
/// println!("Status: {}", response.status());
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    /// Create a new ReqwestFetch with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestFetch with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn build(&self, request: FetchRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        builder
    }
}

impl Default for ReqwestFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = request.url.clone();
        let response = self
            .build(request)
            .send()
            .await
            .map_err(|err| classify_reqwest_error(&err, &url))?;

        let status = response.status();
        let parts = ResponseParts {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response.headers().clone(),
        };

        let body = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|err| classify_reqwest_error(&err, &url)));

        Ok(FetchResponse::from_parts(parts, Box::pin(body)))
    }
}
