//! Fetch capability trait.
//!
//! The interceptor decorates a `Fetch` and is itself a `Fetch`, so call sites
//! opt in by constructing the wrapper instead of relying on a patched global.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{FetchRequest, FetchResponse};

/// Trait for the network-fetch capability.
///
/// # Example
///
/// ```ignore
/// use sse_tap::traits::Fetch;
/// use sse_tap::models::FetchRequest;
///
/// async fn status_of<F: Fetch>(fetch: &F, url: &str) -> Result<u16, FetchError> {
///     let response = fetch.fetch(FetchRequest::get(url)).await?;
///     Ok(response.status())
/// }
/// ```
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue a request and resolve once response headers are available.
    ///
    /// The body is not read; it is returned as a stream.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for Arc<F> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for Box<F> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        (**self).fetch(request).await
    }
}

/// Adapter that turns an async closure into a [`Fetch`].
#[derive(Clone)]
pub struct FnFetch<F> {
    f: F,
}

/// Wrap an async closure as a [`Fetch`].
///
/// ```ignore
/// let fetch = fetch_fn(|request: FetchRequest| async move {
///     Ok(FetchResponse::from_chunks(ResponseParts::new(200, "OK"), vec![]))
/// });
/// ```
pub fn fetch_fn<F, Fut>(f: F) -> FnFetch<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send,
{
    FnFetch { f }
}

#[async_trait]
impl<F, Fut> Fetch for FnFetch<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        (self.f)(request).await
    }
}
