//! Trigger matching: locating pattern occurrences as token spans.
//!
//! Matching runs over the lower-cased, whitespace-joined token surface of
//! the parsed evidence, where tokens are separated by single spaces.
//! Character offsets of each regex match map back to token indices by
//! counting the space boundaries preceding them.

use regex::Regex;

/// A trigger occurrence as token indices.
///
/// `start` is the first matched token, `end` the last one. Extraction rules
/// anchor at either side of the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSpan {
    pub start: usize,
    pub end: usize,
}

fn spaces_before(text: &str, byte_offset: usize) -> usize {
    text.as_bytes()[..byte_offset]
        .iter()
        .filter(|byte| **byte == b' ')
        .count()
}

/// All non-overlapping occurrences of `expression` in `joined_lower`, as
/// token spans.
///
/// The expression is lower-cased before compiling, matching the lower-cased
/// surface it runs against.
pub fn locate_spans(expression: &str, joined_lower: &str) -> Result<Vec<TriggerSpan>, regex::Error> {
    let pattern = Regex::new(&expression.to_lowercase())?;
    Ok(pattern
        .find_iter(joined_lower)
        .map(|found| TriggerSpan {
            start: spaces_before(joined_lower, found.start()),
            end: spaces_before(joined_lower, found.end()),
        })
        .collect())
}
