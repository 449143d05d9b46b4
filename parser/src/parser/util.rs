//! Shared line-shape predicates and character-offset helpers.
//!
//! Column offsets throughout the parser are counted in characters so a stray
//! multi-byte character in captured output never splits a code point.

use regex::Regex;
use std::sync::LazyLock;

// SAFETY: compile-time constant pattern, exercised by tests below.
static PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+#").expect("static regex must compile"));

/// Returns `true` for a device shell prompt (`switch1#`, `switch1#show ...`).
pub fn is_prompt_line(line: &str) -> bool {
    PROMPT_RE.is_match(line)
}

/// Returns `true` when the trimmed line is non-empty and made only of dashes.
pub fn is_dash_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch == '-')
}

/// Returns `true` when the line begins with any whitespace character.
pub fn has_leading_whitespace(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
}

/// Number of leading whitespace characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Length of `line` in characters.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte index of the `char_idx`-th character, or `line.len()` when the index
/// is at or past the end.
fn byte_index(line: &str, char_idx: usize) -> usize {
    line.char_indices()
        .nth(char_idx)
        .map_or(line.len(), |(byte, _)| byte)
}

/// Slices `line` between character offsets `start` and `end` (exclusive, or
/// to end of line when `None`) and trims the result.
///
/// Out-of-range offsets yield an empty or shortened field instead of
/// panicking.
pub fn slice_trimmed(line: &str, start: usize, end: Option<usize>) -> String {
    let begin = byte_index(line, start);
    let finish = match end {
        Some(end) if end <= start => return String::new(),
        Some(end) => byte_index(line, end),
        None => line.len(),
    };
    line[begin..finish].trim().to_string()
}

/// Finds `needle` in `haystack` at or after byte offset `from`, returning the
/// byte offset of the match.
pub fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|pos| pos + from)
}

/// Converts a byte offset (on a char boundary) into a character offset.
pub fn char_offset(line: &str, byte: usize) -> usize {
    line.get(..byte).map_or_else(|| char_len(line), char_len)
}
