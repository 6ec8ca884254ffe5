//! Reporting channel trait.

use std::sync::Arc;

use crate::signal::Signal;

/// Consumer of reporting-channel signals.
///
/// `report` is fire-and-forget: it must not block, must not panic when the
/// downstream consumer is gone, and has no way to push back on the stream
/// being decoded.
pub trait Reporter: Send + Sync {
    fn report(&self, signal: Signal);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, signal: Signal) {
        (**self).report(signal)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, signal: Signal) {
        (**self).report(signal)
    }
}

/// Reporter that discards every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _signal: Signal) {}
}
