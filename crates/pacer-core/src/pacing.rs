//! Per-word display timing: base period from the reading rate and the
//! micro-pause factor that stretches it around punctuation, numbers and long
//! words.

const MS_PER_MINUTE: u32 = 60_000;
const LARGE_NUMBER_DIGITS: usize = 4;
const LONG_WORD_CHARS: usize = 8;

/// Characters that may trail a sentence terminator (`end."` or `end.)`).
const SENTENCE_CLOSERS: &[char] = &[
    '"', '\'', '\u{201D}', '\u{2019}', '\u{00BB}', ')', ']', '}',
];

/// Quote characters that may trail clause punctuation (`word,"`).
const QUOTE_CLOSERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Micro-pause weights. Each matching trigger adds its weight to a base factor
/// of `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MicroPauseSettings {
    pub enabled: bool,
    /// Persisted but currently unused: matching weights always add up.
    pub stack_pauses: bool,
    pub large_numbers_pause: f32,
    pub sentence_end_pause: f32,
    pub other_punctuation_pause: f32,
    pub paragraph_pause: f32,
    pub long_word_pause: f32,
}

impl Default for MicroPauseSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            stack_pauses: true,
            large_numbers_pause: 0.5,
            sentence_end_pause: 1.0,
            other_punctuation_pause: 0.5,
            paragraph_pause: 1.5,
            long_word_pause: 0.3,
        }
    }
}

impl MicroPauseSettings {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            stack_pauses: true,
            large_numbers_pause: 0.0,
            sentence_end_pause: 0.0,
            other_punctuation_pause: 0.0,
            paragraph_pause: 0.0,
            long_word_pause: 0.0,
        }
    }
}

/// Multiplier applied to the base period while `word` is on screen.
pub fn pause_factor(word: &str, next_word: Option<&str>, settings: &MicroPauseSettings) -> f32 {
    if !settings.enabled {
        return 1.0;
    }

    let mut factor = 1.0f32;

    if has_digit_run(word, LARGE_NUMBER_DIGITS) {
        factor += settings.large_numbers_pause;
    }

    let sentence_end = ends_sentence(word);
    if sentence_end {
        factor += settings.sentence_end_pause;
    }

    if ends_clause(word) || next_word.is_some_and(|next| next.starts_with('(')) {
        factor += settings.other_punctuation_pause;
    }

    if sentence_end
        && next_word
            .and_then(|next| next.chars().next())
            .is_some_and(char::is_uppercase)
    {
        factor += settings.paragraph_pause;
    }

    if word.chars().count() >= LONG_WORD_CHARS {
        factor += settings.long_word_pause;
    }

    factor
}

/// `.`, `!` or `?`, optionally followed by closing quotes or brackets.
pub fn ends_sentence(word: &str) -> bool {
    matches!(
        word.trim_end_matches(SENTENCE_CLOSERS).chars().next_back(),
        Some('.' | '!' | '?')
    )
}

/// `,`, `;`, `:` or `)`, optionally followed by closing quotes.
pub fn ends_clause(word: &str) -> bool {
    matches!(
        word.trim_end_matches(QUOTE_CLOSERS).chars().next_back(),
        Some(',' | ';' | ':' | ')')
    )
}

fn has_digit_run(word: &str, min_len: usize) -> bool {
    let mut run = 0usize;
    for c in word.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Unscaled display period for one tick at `wpm`.
pub fn base_period_ms(wpm: u16) -> u32 {
    MS_PER_MINUTE / wpm.max(1) as u32
}

pub fn scaled_period_ms(base_ms: u32, factor: f32) -> u32 {
    if factor <= 1.0 {
        return base_ms;
    }
    (base_ms as f32 * factor) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_weights() -> MicroPauseSettings {
        MicroPauseSettings {
            enabled: true,
            stack_pauses: false,
            large_numbers_pause: 1.0,
            sentence_end_pause: 1.0,
            other_punctuation_pause: 1.0,
            paragraph_pause: 1.0,
            long_word_pause: 1.0,
        }
    }

    fn distinct_weights() -> MicroPauseSettings {
        MicroPauseSettings {
            enabled: true,
            stack_pauses: true,
            large_numbers_pause: 0.1,
            sentence_end_pause: 0.2,
            other_punctuation_pause: 0.4,
            paragraph_pause: 0.8,
            long_word_pause: 1.6,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn large_numbers_slow_down() {
        let settings = unit_weights();
        assert!(pause_factor("1234567", Some("next"), &settings) >= 2.0);
        assert!(approx(pause_factor("123", Some("next"), &settings), 1.0));
        // grouped thousands never form a four-digit run
        assert!(approx(pause_factor("1,234", Some("next"), &settings), 1.0));
    }

    #[test]
    fn disabled_is_always_one() {
        let mut settings = unit_weights();
        settings.enabled = false;
        for word in ["1234567", "end.", "wait,", "extraordinary", ""] {
            assert_eq!(pause_factor(word, Some("Next"), &settings), 1.0);
            assert_eq!(pause_factor(word, None, &settings), 1.0);
        }
    }

    #[test]
    fn plain_word_has_unit_factor() {
        assert!(approx(pause_factor("word", Some("next"), &distinct_weights()), 1.0));
        assert!(approx(pause_factor("", None, &distinct_weights()), 1.0));
    }

    #[test]
    fn sentence_end_with_trailing_quotes() {
        let s = distinct_weights();
        assert!(approx(pause_factor("end.", Some("and"), &s), 1.2));
        assert!(approx(pause_factor("end?\"", Some("and"), &s), 1.2));
        assert!(approx(pause_factor("end!\u{201D}", None, &s), 1.2));
    }

    #[test]
    fn clause_punctuation_and_open_paren() {
        let s = distinct_weights();
        assert!(approx(pause_factor("wait,", Some("then"), &s), 1.4));
        assert!(approx(pause_factor("note:", Some("then"), &s), 1.4));
        assert!(approx(pause_factor("so;'", Some("then"), &s), 1.4));
        assert!(approx(pause_factor("see", Some("(below)"), &s), 1.4));
    }

    #[test]
    fn closing_paren_counts_as_clause_and_closer() {
        let s = distinct_weights();
        // ")" ends a clause; "x.)" ends a sentence and a clause.
        assert!(approx(pause_factor("(aside)", Some("more"), &s), 1.4));
        assert!(approx(pause_factor("(done.)", Some("more"), &s), 1.6));
    }

    #[test]
    fn capitalized_follower_after_sentence_is_paragraph_heuristic() {
        let s = distinct_weights();
        assert!(approx(pause_factor("end.", Some("The"), &s), 2.0));
        // Capital after a non-terminal word does not count.
        assert!(approx(pause_factor("and", Some("The"), &s), 1.0));
        assert!(approx(pause_factor("end.", None, &s), 1.2));
    }

    #[test]
    fn long_words_and_stacking() {
        let s = distinct_weights();
        assert!(approx(pause_factor("extraordinary", None, &s), 2.6));
        // long + sentence end + paragraph
        assert!(approx(pause_factor("conclusion.", Some("Then"), &s), 3.6));
        // 4+ digits in a long token
        assert!(approx(pause_factor("12345678", None, &s), 2.7));
    }

    #[test]
    fn stack_flag_does_not_change_result() {
        let mut a = distinct_weights();
        let mut b = distinct_weights();
        a.stack_pauses = true;
        b.stack_pauses = false;
        assert_eq!(
            pause_factor("conclusion.", Some("Then"), &a),
            pause_factor("conclusion.", Some("Then"), &b)
        );
    }

    #[test]
    fn periods() {
        assert_eq!(base_period_ms(300), 200);
        assert_eq!(base_period_ms(1000), 60);
        assert_eq!(base_period_ms(0), 60_000);
        assert_eq!(scaled_period_ms(200, 1.0), 200);
        assert_eq!(scaled_period_ms(200, 2.5), 500);
    }
}
