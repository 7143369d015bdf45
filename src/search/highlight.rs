//! Locating query occurrences in display text for renderers
use crate::search::{fold_case, fold_char};
use memchr::memmem;
use std::ops::Range;

/// Byte ranges of the non-overlapping, case-insensitive occurrences of
/// `query` (trimmed) in `text`.
///
/// Ranges index the original `text` and always fall on `char` boundaries,
/// even where lower-casing changes a character's encoded length.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = fold_case(query.trim());
    if needle.is_empty() || text.is_empty() {
        return Vec::new();
    }

    // origin[i]: byte offset in `text` of the char that produced byte i of `lowered`
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        let before = lowered.len();
        lowered.extend(ch.to_lowercase().map(fold_char));
        origin.resize(origin.len() + (lowered.len() - before), offset);
    }

    let char_end = |offset: usize| {
        offset + text[offset..].chars().next().map_or(0, char::len_utf8)
    };

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for start in memmem::find_iter(lowered.as_bytes(), needle.as_bytes()) {
        let end = start + needle.len();
        let range = origin[start]..char_end(origin[end - 1]);
        match ranges.last() {
            Some(last) if range.start < last.end => continue,
            _ => ranges.push(range),
        }
    }
    ranges
}
