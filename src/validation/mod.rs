//! Screening of raw topic input before anything goes over the wire.
//!
//! The denylist is a heuristic that mirrors what the backend expects to be
//! filtered on the client. It is not a sanitizer: displayed text is kept
//! inert by the presentation layer, not by this module.

mod types;

pub use types::*;

use regex::RegexSet;
use std::sync::LazyLock;
use tracing::debug;

pub const MIN_TOPIC_CHARS: usize = 2;
pub const MAX_TOPIC_CHARS: usize = 100;

static SUSPICIOUS_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Opening or closing script tags
        r"(?i)<\s*/?\s*script\b",
        r"(?i)javascript:",
        // Inline event handlers such as onclick= or onerror =
        r"(?i)on\w+\s*=",
        r"(?i)<iframe",
        r"(?i)eval\(",
    ])
    .expect("denylist patterns are valid regexes")
});

/// Validates and normalizes a raw topic.
///
/// Rules run in order and stop at the first failure: trim, empty check,
/// length bounds, NUL removal, then the denylist scan.
///
/// Length is counted in Unicode scalar values. A browser counts UTF-16 code
/// units instead, so text outside the Basic Multilingual Plane measures
/// differently: a lone `😀` is `TooShort` here but passes in a page, and 60
/// emoji pass here but are `TooLong` in a page.
pub fn validate(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return invalid(ValidationError::EmptyInput);
    }

    let length = trimmed.chars().count();
    if length < MIN_TOPIC_CHARS {
        return invalid(ValidationError::TooShort);
    }
    if length > MAX_TOPIC_CHARS {
        return invalid(ValidationError::TooLong);
    }

    let value = trimmed.replace('\0', "");

    if is_suspicious(&value) {
        return invalid(ValidationError::SuspiciousContent);
    }

    ValidationResult::Valid { value }
}

pub fn is_suspicious(value: &str) -> bool {
    SUSPICIOUS_PATTERNS.is_match(value)
}

fn invalid(reason: ValidationError) -> ValidationResult {
    debug!("Rejected topic input: {:?}", reason);
    ValidationResult::Invalid { reason }
}
