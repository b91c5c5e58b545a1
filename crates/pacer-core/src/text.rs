//! Word segmentation for RSVP display.

use alloc::{string::String, vec::Vec};

/// Split raw text into display tokens.
///
/// Runs of whitespace collapse to a single separator, leading and trailing
/// whitespace is ignored and punctuation stays glued to its word.
pub fn segment(text: &str) -> Vec<String> {
    let mut words = Vec::with_capacity(count_words(text));
    let mut cursor = 0usize;

    while let Some((word, next_cursor)) = next_word_at(text, cursor) {
        words.push(String::from(word));
        cursor = next_cursor;
    }

    words
}

pub fn count_words(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_word_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Return the word starting at or after byte `cursor` and the byte offset
/// just past it.
pub fn next_word_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let start = cursor + rest.find(|c: char| !c.is_whitespace())?;
    let tail = &text[start..];
    let len = tail.find(char::is_whitespace).unwrap_or(tail.len());

    Some((&text[start..start + len], start + len))
}

pub fn first_words_excerpt(text: &str, max_words: usize) -> &str {
    if text.is_empty() || max_words == 0 {
        return "";
    }

    let mut words = 0usize;
    let mut end = 0usize;
    let mut in_word = false;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                in_word = false;
                words += 1;
                if words >= max_words {
                    return text[..idx].trim();
                }
            }
        } else {
            in_word = true;
            end = idx + ch.len_utf8();
        }
    }

    text[..end].trim()
}
