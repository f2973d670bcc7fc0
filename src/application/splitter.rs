//! Chain Splitter - compound input into ordered sub-commands.
//!
//! Splits on the connectives "and then", "then", "and", but only when they
//! are whitespace-delimited, so words like "sandbox" or "authentic" never
//! split. Known limitation, documented rather than patched: a connective used
//! as ordinary content ("open tom and jerry") still splits.

use once_cell::sync::Lazy;
use regex::Regex;

static SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:and then|then|and)\s+").unwrap());

/// Splits raw input into trimmed, non-empty segments, in order.
pub fn split(input: &str) -> Vec<String> {
    SPLIT_RE
        .split(input)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}
