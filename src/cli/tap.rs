//! Tap command for the sse-tap CLI.
//!
//! Fetches a URL through an [`Interceptor`], copies the caller-facing body to
//! stdout and prints every reporting signal to stderr.

use color_eyre::Result;
use futures::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::adapters::{create_signal_channel, ReqwestFetch};
use crate::config::TapConfig;
use crate::interceptor::Interceptor;
use crate::models::FetchRequest;
use crate::signal::Signal;
use crate::traits::Fetch;

/// Render a signal for stderr, either as a tag line or as JSON.
pub fn render_signal(signal: &Signal, json: bool, prefix: &str) -> Result<String> {
    if json {
        Ok(serde_json::to_string(signal)?)
    } else {
        Ok(signal.kind.to_tag_line(prefix))
    }
}

/// GET `url` through a tap over `fetch`, writing the body to `out`.
///
/// `on_signal` sees every signal in order. Returns once the body is drained
/// and the decoder (if any) has reported its terminal signal.
pub async fn tap_url<F, W, S>(
    fetch: F,
    config: TapConfig,
    url: &str,
    out: &mut W,
    mut on_signal: S,
) -> Result<()>
where
    F: Fetch,
    W: AsyncWrite + Unpin,
    S: FnMut(&Signal) + Send + 'static,
{
    let (reporter, mut signals) = create_signal_channel();
    let printer = tokio::spawn(async move {
        while let Some(signal) = signals.recv().await {
            on_signal(&signal);
        }
    });

    let interceptor = Interceptor::with_config(fetch, reporter, config);
    let result = interceptor.fetch(FetchRequest::get(url)).await;
    // The printer stops once the decoder task also lets go of the reporter.
    drop(interceptor);

    let copied = match result {
        Ok(response) => {
            tracing::info!(
                status = response.status(),
                content_type = response.content_type().unwrap_or(""),
                "response received"
            );
            copy_body(response.into_body(), out).await
        }
        Err(err) => Err(err.into()),
    };

    printer.await?;
    copied
}

async fn copy_body<W>(mut body: crate::models::ByteStream, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(chunk) = body.next().await {
        out.write_all(&chunk?).await?;
        out.flush().await?;
    }
    Ok(())
}

/// Handle `sse-tap [--json] <url>`.
pub async fn handle_tap_command(url: &str, json: bool) -> Result<()> {
    let config = TapConfig::from_env()?;
    let prefix = config.tag_prefix.clone();
    let mut stdout = tokio::io::stdout();

    tap_url(ReqwestFetch::new(), config, url, &mut stdout, move |signal| {
        match render_signal(signal, json, &prefix) {
            Ok(line) => eprintln!("{}", line),
            Err(e) => tracing::warn!("failed to render signal: {}", e),
        }
    })
    .await
}
