//! Context Parser
//!
//! Works out what the user is typing at the cursor: a filter key, or the
//! value of a particular key. Only text left of the cursor is considered,
//! and only the first colon of the current word splits key from value, so
//! `created:>2024-01-01T10:00` keeps its later colons in the value.

use serde::Serialize;

/// Cursor context for one keystroke. Borrows from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextInfo<'a> {
    /// The key being typed, or the value being typed after the colon
    pub current_word: &'a str,
    /// Byte offset where `current_word` starts
    pub token_start: usize,
    pub is_key_position: bool,
    /// Key whose value is being typed; not checked against any registry
    pub governing_key: Option<&'a str>,
    /// Byte offset of the separating colon, in value position
    pub colon_offset: Option<usize>,
}

impl ContextInfo<'_> {
    pub fn is_value_position(&self) -> bool {
        !self.is_key_position
    }
}

/// Parse the cursor context of `text`.
///
/// `cursor` is a byte offset; it is clamped to the text and moved back to
/// the nearest char boundary.
pub fn parse_context(text: &str, cursor: usize) -> ContextInfo<'_> {
    let cursor = clamp_cursor(text, cursor);
    let before = &text[..cursor];
    let word_start = current_word_start(before);
    let word = &before[word_start..];

    match word.find(':') {
        None => ContextInfo {
            current_word: word,
            token_start: word_start,
            is_key_position: true,
            governing_key: None,
            colon_offset: None,
        },
        Some(colon) => {
            let colon_offset = word_start + colon;
            ContextInfo {
                current_word: &word[colon + 1..],
                token_start: colon_offset + 1,
                is_key_position: false,
                governing_key: Some(&word[..colon]),
                colon_offset: Some(colon_offset),
            }
        }
    }
}

/// Largest char boundary not past `cursor`
pub(crate) fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Offset just past the last unescaped whitespace in `before`
fn current_word_start(before: &str) -> usize {
    before
        .char_indices()
        .rev()
        .find(|&(i, c)| c.is_whitespace() && !is_escaped(before.as_bytes(), i))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

/// A byte is escaped when preceded by an odd run of backslashes
fn is_escaped(bytes: &[u8], index: usize) -> bool {
    let backslashes = bytes[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}
