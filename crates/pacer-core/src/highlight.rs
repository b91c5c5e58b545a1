//! Focus-letter (pivot) selection and word splitting.

use log::warn;

pub const MAX_HIGHLIGHT_RULES: usize = 16;

/// Pivot used when a pattern has no rules at all.
pub const EMPTY_PATTERN_PIVOT: isize = 8;

/// Maps words up to `max_word_length` characters to a focus-letter offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HighlightRule {
    pub max_word_length: u16,
    pub pivot_offset: u16,
}

impl HighlightRule {
    pub const fn new(max_word_length: u16, pivot_offset: u16) -> Self {
        Self {
            max_word_length,
            pivot_offset,
        }
    }
}

pub const DEFAULT_HIGHLIGHT_RULES: [HighlightRule; 9] = [
    HighlightRule::new(4, 0),
    HighlightRule::new(6, 1),
    HighlightRule::new(9, 2),
    HighlightRule::new(13, 3),
    HighlightRule::new(17, 4),
    HighlightRule::new(21, 5),
    HighlightRule::new(25, 6),
    HighlightRule::new(29, 7),
    HighlightRule::new(33, 8),
];

/// Focus letter kept close to the start of the word.
pub const LEADING_HIGHLIGHT_RULES: [HighlightRule; 5] = [
    HighlightRule::new(5, 0),
    HighlightRule::new(9, 1),
    HighlightRule::new(13, 2),
    HighlightRule::new(21, 3),
    HighlightRule::new(33, 4),
];

/// Focus letter near the middle of the word.
pub const CENTERED_HIGHLIGHT_RULES: [HighlightRule; 8] = [
    HighlightRule::new(2, 0),
    HighlightRule::new(4, 1),
    HighlightRule::new(6, 2),
    HighlightRule::new(8, 3),
    HighlightRule::new(10, 4),
    HighlightRule::new(14, 5),
    HighlightRule::new(20, 7),
    HighlightRule::new(33, 10),
];

/// Built-in patterns the reader can cycle through, default first.
pub const HIGHLIGHT_PRESETS: [&[HighlightRule]; 3] = [
    &DEFAULT_HIGHLIGHT_RULES,
    &LEADING_HIGHLIGHT_RULES,
    &CENTERED_HIGHLIGHT_RULES,
];

/// Ordered rule table, ascending by `max_word_length`.
///
/// Order is the caller's responsibility: lookups are first-match and the
/// table is never re-sorted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HighlightPattern {
    rules: heapless::Vec<HighlightRule, MAX_HIGHLIGHT_RULES>,
}

impl HighlightPattern {
    pub const fn empty() -> Self {
        Self {
            rules: heapless::Vec::new(),
        }
    }

    /// Build a pattern from caller-supplied rules. Rules past
    /// [`MAX_HIGHLIGHT_RULES`] are dropped.
    pub fn from_rules(rules: &[HighlightRule]) -> Self {
        let mut pattern = Self::empty();
        for rule in rules {
            if pattern.rules.push(*rule).is_err() {
                warn!(
                    "highlight: pattern truncated to {} rules (got {})",
                    MAX_HIGHLIGHT_RULES,
                    rules.len()
                );
                break;
            }
        }
        pattern
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Position of this pattern in [`HIGHLIGHT_PRESETS`], if it is one.
    pub fn preset_index(&self) -> Option<usize> {
        HIGHLIGHT_PRESETS
            .iter()
            .position(|rules| self.rules() == *rules)
    }

    /// The preset after this one. A custom pattern goes back to the default.
    pub fn next_preset(&self) -> Self {
        let next = self
            .preset_index()
            .map_or(0, |index| (index + 1) % HIGHLIGHT_PRESETS.len());
        Self::from_rules(HIGHLIGHT_PRESETS[next])
    }
}

impl Default for HighlightPattern {
    fn default() -> Self {
        Self::from_rules(&DEFAULT_HIGHLIGHT_RULES)
    }
}

/// A word cut around its focus letter. `before + pivot + after` is always the
/// source word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordParts<'a> {
    pub before: &'a str,
    pub pivot: &'a str,
    pub after: &'a str,
}

impl WordParts<'_> {
    pub const EMPTY: WordParts<'static> = WordParts {
        before: "",
        pivot: "",
        after: "",
    };
}

/// Character offset of the focus letter of `word`.
///
/// Words longer than every rule fall back to
/// `min(last.pivot_offset, len / 2 - 1)`, which may be negative for very
/// short patterns; [`split`] tolerates any offset.
pub fn pivot_offset(word: &str, pattern: &HighlightPattern) -> isize {
    let len = word.chars().count();
    if len == 0 {
        return 0;
    }

    for rule in pattern.rules() {
        if len <= rule.max_word_length as usize {
            return rule.pivot_offset as isize;
        }
    }

    match pattern.rules().last() {
        Some(last) => core::cmp::min(last.pivot_offset as isize, (len / 2) as isize - 1),
        None => EMPTY_PATTERN_PIVOT,
    }
}

/// Split `word` at character `offset`, clamping every slice to the word.
pub fn split(word: &str, offset: isize) -> WordParts<'_> {
    if word.is_empty() {
        return WordParts::EMPTY;
    }

    let before_end = byte_index_at(word, offset);
    let after_start = byte_index_at(word, offset.saturating_add(1));
    let pivot_end = after_start.max(before_end);

    WordParts {
        before: &word[..before_end],
        pivot: &word[before_end..pivot_end],
        after: &word[pivot_end..],
    }
}

/// Byte index of the `char_offset`-th character, clamped to `0..=len`.
fn byte_index_at(word: &str, char_offset: isize) -> usize {
    if char_offset <= 0 {
        return 0;
    }

    word.char_indices()
        .nth(char_offset as usize)
        .map_or(word.len(), |(idx, _)| idx)
}
