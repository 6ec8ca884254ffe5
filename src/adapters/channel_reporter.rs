//! Channel-backed reporter.

use tokio::sync::mpsc;

use crate::signal::Signal;
use crate::traits::Reporter;

/// Type alias for the receiving end of a signal channel.
pub type SignalReceiver = mpsc::UnboundedReceiver<Signal>;

/// Reporter that forwards signals into an unbounded tokio channel.
///
/// The channel is unbounded so the decoder never waits on the observer.
/// Signals sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::UnboundedSender<Signal>) -> Self {
        Self { tx }
    }

    /// Whether the receiving side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Reporter for ChannelReporter {
    fn report(&self, signal: Signal) {
        let _ = self.tx.send(signal);
    }
}

/// Create a signal channel.
///
/// The reporter can be cloned to share one receiver across interceptors.
pub fn create_signal_channel() -> (ChannelReporter, SignalReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelReporter::new(tx), rx)
}
