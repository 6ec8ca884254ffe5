//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let (reporter, mut rx) = create_signal_channel();
//! // ... drive an interceptor ...
//! let kinds = collect_until_terminal(&mut rx).await;
//! ```

#![allow(dead_code)]

use std::time::Duration;

use bytes::Bytes;
use futures::stream::{self, Stream};
use sse_tap::adapters::SignalReceiver;
use sse_tap::{FetchError, SignalKind};

/// How long a test waits for a decoder to finish.
pub const SIGNAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Receive signals until a terminal one arrives, returning their kinds.
///
/// Panics if the channel closes early or nothing terminal shows up within
/// [`SIGNAL_TIMEOUT`].
pub async fn collect_until_terminal(rx: &mut SignalReceiver) -> Vec<SignalKind> {
    let collect = async {
        let mut kinds = Vec::new();
        while let Some(signal) = rx.recv().await {
            let terminal = signal.kind.is_terminal();
            kinds.push(signal.kind);
            if terminal {
                return kinds;
            }
        }
        panic!("signal channel closed before a terminal signal: {:?}", kinds);
    };
    tokio::time::timeout(SIGNAL_TIMEOUT, collect)
        .await
        .expect("timed out waiting for a terminal signal")
}

/// Assert that no signal is waiting on the channel.
pub async fn assert_no_signals(rx: &mut SignalReceiver) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err(), "unexpected signal on the channel");
}

/// Byte stream yielding `chunks` in order.
pub fn chunked(chunks: &[&str]) -> impl Stream<Item = Result<Bytes, FetchError>> + Unpin {
    stream::iter(
        chunks
            .iter()
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk.as_bytes())))
            .collect::<Vec<_>>(),
    )
}

/// Byte stream yielding `bytes` split into pieces of `size` bytes.
pub fn split_every(bytes: &[u8], size: usize) -> impl Stream<Item = Result<Bytes, FetchError>> + Unpin {
    stream::iter(
        bytes
            .chunks(size)
            .map(|piece| Ok(Bytes::copy_from_slice(piece)))
            .collect::<Vec<_>>(),
    )
}

/// Only the `event-received` payloads, in order.
pub fn payloads(kinds: &[SignalKind]) -> Vec<String> {
    kinds
        .iter()
        .filter_map(|kind| match kind {
            SignalKind::EventReceived { data } => Some(data.clone()),
            _ => None,
        })
        .collect()
}
