//! Stream duplication.
//!
//! [`tee`] splits one byte stream into two handles that each see the full
//! byte sequence at their own pace. Whichever handle runs ahead pulls from
//! the source and queues a copy for the other, so a slow or idle reader
//! never stalls a fast one. `Bytes` clones share the underlying buffer, so
//! a queued copy costs a refcount, not a memcpy.
//!
//! Dropping a handle detaches it: its queue is released and nothing more is
//! queued for it. Dropping both releases the source.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll, Wake, Waker};

use bytes::Bytes;
use futures::Stream;

use crate::error::FetchError;
use crate::models::ByteStream;

type Item = Result<Bytes, FetchError>;

/// Which half of a tee a handle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeeSide {
    Left = 0,
    Right = 1,
}

impl TeeSide {
    fn index(self) -> usize {
        self as usize
    }

    fn other(self) -> TeeSide {
        match self {
            TeeSide::Left => TeeSide::Right,
            TeeSide::Right => TeeSide::Left,
        }
    }
}

struct TeeState {
    source: Option<ByteStream>,
    queues: [VecDeque<Item>; 2],
    attached: [bool; 2],
    finished: bool,
}

/// Wakes every parked handle when the source makes progress.
///
/// The source only remembers the waker it was last polled with, so both
/// handles share this one and park their own wakers inside it.
#[derive(Default)]
struct TeeWaker {
    parked: Mutex<[Option<Waker>; 2]>,
}

impl TeeWaker {
    fn park(&self, side: TeeSide, waker: &Waker) {
        let mut parked = lock(&self.parked);
        match &parked[side.index()] {
            Some(existing) if existing.will_wake(waker) => {}
            _ => parked[side.index()] = Some(waker.clone()),
        }
    }

    fn wake_side(&self, side: TeeSide) {
        let waker = lock(&self.parked)[side.index()].take();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Wake for TeeWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let wakers = std::mem::take(&mut *lock(&self.parked));
        for waker in wakers.into_iter().flatten() {
            waker.wake();
        }
    }
}

struct Shared {
    state: Mutex<TeeState>,
    waker: Arc<TeeWaker>,
}

/// One half of a teed stream.
pub struct TeeStream {
    shared: Arc<Shared>,
    side: TeeSide,
}

/// Split `source` into two independent handles over the same bytes.
///
/// Takes ownership of the source; it is only ever read through the handles.
pub fn tee(source: ByteStream) -> (TeeStream, TeeStream) {
    let shared = Arc::new(Shared {
        state: Mutex::new(TeeState {
            source: Some(source),
            queues: [VecDeque::new(), VecDeque::new()],
            attached: [true, true],
            finished: false,
        }),
        waker: Arc::new(TeeWaker::default()),
    });

    (
        TeeStream {
            shared: Arc::clone(&shared),
            side: TeeSide::Left,
        },
        TeeStream {
            shared,
            side: TeeSide::Right,
        },
    )
}

impl TeeStream {
    pub fn side(&self) -> TeeSide {
        self.side
    }

    /// Number of items queued for this handle and not yet read.
    pub fn queued(&self) -> usize {
        lock(&self.shared.state).queues[self.side.index()].len()
    }

    /// Box this handle as a [`ByteStream`].
    pub fn boxed(self) -> ByteStream {
        Box::pin(self)
    }
}

impl Stream for TeeStream {
    type Item = Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Item>> {
        let this = self.get_mut();
        let side = this.side;
        let other = side.other();
        let mut state = lock(&this.shared.state);

        if let Some(item) = state.queues[side.index()].pop_front() {
            return Poll::Ready(Some(item));
        }
        if state.finished {
            return Poll::Ready(None);
        }

        this.shared.waker.park(side, cx.waker());
        let waker = Waker::from(Arc::clone(&this.shared.waker));
        let mut source_cx = Context::from_waker(&waker);

        let polled = match state.source.as_mut() {
            Some(source) => source.as_mut().poll_next(&mut source_cx),
            None => Poll::Ready(None),
        };

        match polled {
            Poll::Ready(Some(item)) => {
                if state.attached[other.index()] {
                    state.queues[other.index()].push_back(item.clone());
                    drop(state);
                    this.shared.waker.wake_side(other);
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                state.finished = true;
                state.source = None;
                drop(state);
                this.shared.waker.wake_side(other);
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for TeeStream {
    fn drop(&mut self) {
        let mut state = lock(&self.shared.state);
        let side = self.side.index();
        state.attached[side] = false;
        state.queues[side].clear();
        if !state.attached.iter().any(|attached| *attached) {
            state.source = None;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn chunks(parts: &[&'static str]) -> ByteStream {
        Box::pin(futures::stream::iter(
            parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect::<Vec<_>>(),
        ))
    }

    async fn collect(stream: TeeStream) -> Vec<Item> {
        stream.collect().await
    }

    fn channel_stream() -> (mpsc::UnboundedSender<Item>, ByteStream) {
        let (tx, rx) = mpsc::unbounded_channel::<Item>();
        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        (tx, Box::pin(stream))
    }

    #[tokio::test]
    async fn test_both_sides_see_all_bytes() {
        let (left, right) = tee(chunks(&["a", "b", "c"]));
        let (l, r) = tokio::join!(collect(left), collect(right));
        let expected: Vec<Item> = ["a", "b", "c"].iter().map(|s| Ok(Bytes::from(*s))).collect();
        assert_eq!(l, expected);
        assert_eq!(r, expected);
    }

    #[tokio::test]
    async fn test_drain_left_before_right_is_read() {
        let (left, right) = tee(chunks(&["one", "two", "three"]));
        let l = collect(left).await;
        assert_eq!(l.len(), 3);
        assert_eq!(right.queued(), 3);
        let r = collect(right).await;
        assert_eq!(l, r);
    }

    #[tokio::test]
    async fn test_drain_right_before_left_is_read() {
        let (left, right) = tee(chunks(&["x", "y"]));
        let r = collect(right).await;
        let l = collect(left).await;
        assert_eq!(l, r);
        assert_eq!(l.len(), 2);
    }

    #[tokio::test]
    async fn test_errors_reach_both_sides() {
        let source: ByteStream = Box::pin(futures::stream::iter(vec![
            Ok(Bytes::from("data")),
            Err(FetchError::Io("reset".to_string())),
        ]));
        let (left, right) = tee(source);
        let l = collect(left).await;
        let r = collect(right).await;
        assert_eq!(l, r);
        assert_eq!(l[1], Err(FetchError::Io("reset".to_string())));
    }

    #[tokio::test]
    async fn test_dropped_side_stops_queueing() {
        let (left, right) = tee(chunks(&["a", "b"]));
        drop(right);
        let l = collect(left).await;
        assert_eq!(l.len(), 2);
    }

    #[tokio::test]
    async fn test_dropping_both_releases_source() {
        let (tx, source) = channel_stream();
        let (left, right) = tee(source);
        drop(left);
        assert!(!tx.is_closed());
        drop(right);
        assert!(tx.is_closed());
    }

    #[tokio::test]
    async fn test_waiting_side_woken_by_other_sides_read() {
        let (tx, source) = channel_stream();
        let (mut left, mut right) = tee(source);

        // Both sides park on the empty source.
        let right_task = tokio::spawn(async move {
            let first = right.next().await;
            let rest: Vec<Item> = right.collect().await;
            (first, rest)
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        tx.send(Ok(Bytes::from("hello"))).unwrap();
        assert_eq!(left.next().await, Some(Ok(Bytes::from("hello"))));
        drop(tx);
        assert_eq!(left.next().await, None);

        let (first, rest) = tokio::time::timeout(Duration::from_secs(1), right_task)
            .await
            .expect("right side should be woken")
            .unwrap();
        assert_eq!(first, Some(Ok(Bytes::from("hello"))));
        assert!(rest.is_empty());
    }

    #[tokio::test]
    async fn test_empty_source() {
        let (left, right) = tee(chunks(&[]));
        assert!(collect(left).await.is_empty());
        assert!(collect(right).await.is_empty());
    }

    #[test]
    fn test_sides() {
        let (left, right) = tee(chunks(&[]));
        assert_eq!(left.side(), TeeSide::Left);
        assert_eq!(right.side(), TeeSide::Right);
        assert_eq!(TeeSide::Left.other(), TeeSide::Right);
    }
}
