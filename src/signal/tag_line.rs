//! Tag-line rendering of signals.
//!
//! Observers that only see a log (a browser console, a captured stderr) can
//! recover the signal stream from lines shaped like:
//!
//! ```text
//! [sse-tap-new]
//! [sse-tap-data] {"delta":"hi"}
//! [sse-tap-closed]
//! [sse-tap-error] stream read failed: IO error: reset
//! ```
//!
//! Every signal renders to exactly one line: newlines, carriage returns and
//! backslashes in payloads are escaped as `\n`, `\r` and `\\`.

use super::SignalKind;

/// Prefix used when none is configured.
pub const DEFAULT_TAG_PREFIX: &str = "sse-tap";

const OPENED: &str = "new";
const CLOSED: &str = "closed";
const DATA: &str = "data";
const ERROR: &str = "error";

impl SignalKind {
    /// Render this signal as a single tag line.
    pub fn to_tag_line(&self, prefix: &str) -> String {
        match self {
            SignalKind::StreamOpened => format!("[{}-{}]", prefix, OPENED),
            SignalKind::StreamClosed => format!("[{}-{}]", prefix, CLOSED),
            SignalKind::EventReceived { data } => {
                format!("[{}-{}] {}", prefix, DATA, escape(data))
            }
            SignalKind::StreamError { message } => {
                format!("[{}-{}] {}", prefix, ERROR, escape(message))
            }
        }
    }
}

fn escape(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    for c in payload.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            // Unknown escape: keep it verbatim
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse a tag line produced by [`SignalKind::to_tag_line`].
///
/// Returns `None` for lines that do not carry a tag with this prefix.
pub fn parse_tag_line(prefix: &str, line: &str) -> Option<SignalKind> {
    let rest = line.strip_prefix('[')?.strip_prefix(prefix)?.strip_prefix('-')?;
    let (tag, payload) = rest.split_once(']')?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    match tag {
        OPENED if payload.is_empty() => Some(SignalKind::StreamOpened),
        CLOSED if payload.is_empty() => Some(SignalKind::StreamClosed),
        DATA => Some(SignalKind::event(unescape(payload))),
        ERROR => Some(SignalKind::error(unescape(payload))),
        _ => None,
    }
}
