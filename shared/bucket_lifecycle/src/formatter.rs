//! Canonical bucket-name derivation
//!
//! Strips every character that is not an ASCII letter or digit and lowercases
//! the remainder. Provider naming constraints (3-63 characters, no leading
//! digit rules, reserved prefixes) are deliberately not enforced here; callers
//! supply a raw candidate that satisfies them after stripping.

/// Derives the canonical bucket name from a raw candidate string
///
/// Pure and deterministic: the same input always yields the same output, and
/// the function is idempotent over its own results.
#[must_use]
pub fn format_bucket_name(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
