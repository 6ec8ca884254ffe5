//! Async read loop driving [`SseDecoder`].

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, Instrument};

use super::decoder::{DecoderState, SseDecoder, Trigger};
use crate::error::FetchError;
use crate::signal::{Signal, SignalKind, TapId};
use crate::traits::Reporter;

/// Consume `stream` to completion, reporting every signal it produces.
///
/// Reports `stream-opened` first, then one `event-received` per complete
/// record, then `stream-closed` or a single `stream-error`. No read is
/// attempted after a terminal state, and the stream is dropped on return.
pub async fn decode_stream<S, R>(
    mut stream: S,
    reporter: &R,
    tap_id: TapId,
    strict_utf8: bool,
) -> DecoderState
where
    S: Stream<Item = Result<Bytes, FetchError>> + Unpin,
    R: Reporter + ?Sized,
{
    reporter.report(Signal::new(tap_id, SignalKind::StreamOpened));

    let mut decoder = SseDecoder::new(strict_utf8);
    while !decoder.state().is_terminal() {
        let trigger = match stream.next().await {
            Some(Ok(chunk)) => Trigger::ChunkArrived(chunk),
            Some(Err(err)) => Trigger::ErrorRaised(err.into()),
            None => Trigger::EndReached,
        };
        for kind in decoder.handle(trigger) {
            reporter.report(Signal::new(tap_id, kind));
        }
    }

    info!(
        state = decoder.state().as_str(),
        events = decoder.events(),
        "sse stream finished"
    );
    decoder.state()
}

/// Run [`decode_stream`] as a detached task on `runtime`.
///
/// The returned handle may be dropped; the outcome is observable through
/// the reporter either way.
pub fn spawn_decoder<S, R>(
    runtime: &Handle,
    stream: S,
    reporter: R,
    tap_id: TapId,
    strict_utf8: bool,
) -> JoinHandle<DecoderState>
where
    S: Stream<Item = Result<Bytes, FetchError>> + Unpin + Send + 'static,
    R: Reporter + 'static,
{
    let span = tracing::info_span!("sse_tap", %tap_id);
    runtime.spawn(
        async move { decode_stream(stream, &reporter, tap_id, strict_utf8).await }
            .instrument(span),
    )
}
