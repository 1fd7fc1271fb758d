//! Time expressions in free text.
//!
//! Used as a fallback when a query has no time keyword.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Finds a time expression in text.
pub trait TimeEntityExtractor: Send + Sync + fmt::Debug {
    /// Return the time expression in `text`, if any.
    fn extract_time(&self, text: &str) -> Option<String>;
}

/// Extractor that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTimeExtraction;

impl TimeEntityExtractor for NoTimeExtraction {
    fn extract_time(&self, _text: &str) -> Option<String> {
        None
    }
}

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s?[ap]\.?m\b\.?|\b\d{1,2}:\d{2}\b")
        .expect("clock time pattern is valid")
});

/// Recognises clock times such as `7am`, `7:30 pm` and `07:30`.
///
/// When several appear, the last one is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTimeExtractor;

impl TimeEntityExtractor for ClockTimeExtractor {
    fn extract_time(&self, text: &str) -> Option<String> {
        CLOCK_TIME
            .find_iter(text)
            .last()
            .map(|m| m.as_str().to_string())
    }
}
