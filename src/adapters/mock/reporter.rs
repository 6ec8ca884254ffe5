//! Recording reporter for testing.

use std::sync::{Arc, Mutex};

use crate::signal::{Signal, SignalKind};
use crate::traits::Reporter;

/// Reporter that keeps every signal in memory.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    signals: Arc<Mutex<Vec<Signal>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All signals received so far.
    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().unwrap().clone()
    }

    /// Kinds of all signals received so far.
    pub fn kinds(&self) -> Vec<SignalKind> {
        self.signals
            .lock()
            .unwrap()
            .iter()
            .map(|signal| signal.kind.clone())
            .collect()
    }

    /// Payloads of all `event-received` signals so far.
    pub fn events(&self) -> Vec<String> {
        self.signals
            .lock()
            .unwrap()
            .iter()
            .filter_map(|signal| match &signal.kind {
                SignalKind::EventReceived { data } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.signals.lock().unwrap().clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, signal: Signal) {
        self.signals.lock().unwrap().push(signal);
    }
}
