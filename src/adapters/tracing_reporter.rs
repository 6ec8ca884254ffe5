//! Reporter that writes signals to the tracing log as tag lines.

use tracing::{info, warn};

use crate::signal::{Signal, SignalKind, DEFAULT_TAG_PREFIX};
use crate::traits::Reporter;

#[derive(Debug, Clone)]
pub struct TracingReporter {
    prefix: String,
}

impl TracingReporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_PREFIX)
    }
}

impl Reporter for TracingReporter {
    fn report(&self, signal: Signal) {
        let line = signal.kind.to_tag_line(&self.prefix);
        match signal.kind {
            SignalKind::StreamError { .. } => warn!(tap_id = %signal.tap_id, "{}", line),
            _ => info!(tap_id = %signal.tap_id, "{}", line),
        }
    }
}
