//! Tap configuration.
//!
//! Use the builder methods to customize, or [`TapConfig::from_env`] to read
//! overrides from the environment.
//!
//! ```ignore
//! use sse_tap::TapConfig;
//!
//! let config = TapConfig::default()
//!     .with_tag_prefix("aichat-proxy-sse")
//!     .with_strict_utf8(true);
//! ```

use crate::error::{TapError, TapResult};
use crate::signal::DEFAULT_TAG_PREFIX;

/// Environment variable overriding [`TapConfig::content_type_marker`].
pub const ENV_CONTENT_TYPE: &str = "SSE_TAP_CONTENT_TYPE";
/// Environment variable overriding [`TapConfig::tag_prefix`].
pub const ENV_TAG_PREFIX: &str = "SSE_TAP_TAG_PREFIX";
/// Environment variable overriding [`TapConfig::strict_utf8`].
pub const ENV_STRICT_UTF8: &str = "SSE_TAP_STRICT_UTF8";

/// Media type selecting which responses get tapped.
pub const EVENT_STREAM_MEDIA_TYPE: &str = "text/event-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapConfig {
    /// Substring of `Content-Type` (matched case-insensitively) that marks a
    /// response as an event stream (default: `text/event-stream`)
    pub content_type_marker: String,
    /// Prefix for tag-line rendering of signals (default: `sse-tap`)
    pub tag_prefix: String,
    /// Fail the decoder on invalid UTF-8 instead of substituting U+FFFD
    /// (default: false)
    pub strict_utf8: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            content_type_marker: EVENT_STREAM_MEDIA_TYPE.to_string(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            strict_utf8: false,
        }
    }
}

impl TapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_type_marker(mut self, marker: impl Into<String>) -> Self {
        self.content_type_marker = marker.into().to_ascii_lowercase();
        self
    }

    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    pub fn with_strict_utf8(mut self, strict: bool) -> Self {
        self.strict_utf8 = strict;
        self
    }

    /// Check whether a `Content-Type` value selects a response for tapping.
    pub fn is_event_stream(&self, content_type: Option<&str>) -> bool {
        match content_type {
            Some(value) => value
                .to_ascii_lowercase()
                .contains(&self.content_type_marker.to_ascii_lowercase()),
            None => false,
        }
    }

    /// Build a config from defaults overridden by `SSE_TAP_*` variables.
    pub fn from_env() -> TapResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> TapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(marker) = lookup(ENV_CONTENT_TYPE) {
            let marker = marker.trim();
            if marker.is_empty() {
                return Err(TapError::config(ENV_CONTENT_TYPE, "must not be empty"));
            }
            config = config.with_content_type_marker(marker);
        }

        if let Some(prefix) = lookup(ENV_TAG_PREFIX) {
            let prefix = prefix.trim();
            if prefix.is_empty() || prefix.contains(|c: char| c == '[' || c == ']' || c.is_whitespace()) {
                return Err(TapError::config(
                    ENV_TAG_PREFIX,
                    "must be non-empty without brackets or whitespace",
                ));
            }
            config = config.with_tag_prefix(prefix);
        }

        if let Some(strict) = lookup(ENV_STRICT_UTF8) {
            config = config.with_strict_utf8(parse_bool(ENV_STRICT_UTF8, &strict)?);
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> TapResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(TapError::config(key, format!("expected a boolean, got '{}'", other))),
    }
}
