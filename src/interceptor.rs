//! Fetch wrapper that taps event-stream responses.
//!
//! [`Interceptor`] wraps any [`Fetch`] and is itself a [`Fetch`], so call
//! sites opt in by swapping the value they hold:
//!
//! ```ignore
//! use sse_tap::adapters::{create_signal_channel, ReqwestFetch};
//! use sse_tap::Interceptor;
//!
//! let (reporter, mut signals) = create_signal_channel();
//! let fetch = Interceptor::new(ReqwestFetch::new(), reporter);
//!
//! let response = fetch.fetch(FetchRequest::get(url)).await?;
//! // `response` carries the same status, headers and bytes as the upstream
//! // response; decoded events arrive on `signals`.
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::TapConfig;
use crate::error::FetchError;
use crate::models::{FetchRequest, FetchResponse};
use crate::signal::{Signal, SignalKind};
use crate::sse::spawn_decoder;
use crate::tee::tee;
use crate::traits::{Fetch, Reporter};

pub struct Interceptor<F, R> {
    inner: F,
    reporter: Arc<R>,
    config: TapConfig,
}

impl<F, R> Interceptor<F, R>
where
    F: Fetch,
    R: Reporter + 'static,
{
    pub fn new(inner: F, reporter: R) -> Self {
        Self::with_config(inner, reporter, TapConfig::default())
    }

    pub fn with_config(inner: F, reporter: R, config: TapConfig) -> Self {
        Self {
            inner,
            reporter: Arc::new(reporter),
            config,
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Split an event-stream body and start decoding one half.
    ///
    /// Outside a tokio runtime there is nowhere to run the decoder, so the
    /// response is returned untapped after a `stream-error` is reported.
    fn tap(&self, response: FetchResponse) -> FetchResponse {
        let tap_id = Uuid::new_v4();
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!(%tap_id, "no tokio runtime, passing event stream through untapped: {}", err);
                self.reporter.report(Signal::new(
                    tap_id,
                    SignalKind::error(format!("tap unavailable: {}", err)),
                ));
                return response;
            }
        };

        let (parts, body) = response.into_parts();
        let (caller, decoder) = tee(body);

        debug!(%tap_id, status = parts.status, "tapping event stream");
        spawn_decoder(
            &runtime,
            decoder,
            Arc::clone(&self.reporter),
            tap_id,
            self.config.strict_utf8,
        );

        FetchResponse::from_parts(parts, caller.boxed())
    }
}

#[async_trait]
impl<F, R> Fetch for Interceptor<F, R>
where
    F: Fetch,
    R: Reporter + 'static,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = request.url.clone();
        let response = match self.inner.fetch(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, code = err.error_code(), "upstream fetch failed: {}", err);
                self.reporter.report(Signal::new(
                    Uuid::new_v4(),
                    SignalKind::error(err.to_string()),
                ));
                return Err(err);
            }
        };

        if !self.config.is_event_stream(response.content_type()) {
            return Ok(response);
        }

        Ok(self.tap(response))
    }
}
