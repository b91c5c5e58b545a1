//! Comprehension quizzes over the text just read.
//!
//! Quiz generation and answer judging normally go through a
//! [`QuizProvider`]. When the provider fails, or none is configured, the
//! local fallbacks here take over: [`mock_quiz`] builds fill-in-the-blank
//! questions from the text itself and [`judge_by_substring`] compares answers
//! by containment.

use alloc::{format, string::String, vec::Vec};
use core::fmt::Display;

use log::warn;

use crate::{
    pacing::ends_sentence,
    text::{first_words_excerpt, segment},
};

pub const DEFAULT_QUIZ_QUESTIONS: usize = 3;
const MIN_SENTENCE_WORDS: usize = 4;
const MIN_KEY_WORD_CHARS: usize = 4;
const MAX_OPTIONS: usize = 4;
const BLANK: &str = "_____";
const LOG_EXCERPT_WORDS: usize = 5;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl QuizQuestion {
    pub fn answer(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Judgment {
    pub correct: bool,
    pub feedback: String,
}

/// Source of quizzes and answer judgments.
pub trait QuizProvider {
    type Error: Display;

    fn generate(&mut self, text: &str, max_questions: usize) -> Result<Quiz, Self::Error>;

    fn judge(&mut self, question: &str, expected: &str, answer: &str)
    -> Result<Judgment, Self::Error>;
}

/// Provider backed only by the local fallbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalQuizProvider;

impl QuizProvider for LocalQuizProvider {
    type Error = core::convert::Infallible;

    fn generate(&mut self, text: &str, max_questions: usize) -> Result<Quiz, Self::Error> {
        Ok(mock_quiz(text, max_questions))
    }

    fn judge(
        &mut self,
        _question: &str,
        expected: &str,
        answer: &str,
    ) -> Result<Judgment, Self::Error> {
        Ok(judge_by_substring(expected, answer))
    }
}

pub fn generate_or_mock<P: QuizProvider>(provider: &mut P, text: &str, max_questions: usize) -> Quiz {
    match provider.generate(text, max_questions) {
        Ok(quiz) if !quiz.questions.is_empty() => quiz,
        Ok(_) => {
            warn!(
                "quiz: provider returned no questions for {:?}, using local quiz",
                first_words_excerpt(text, LOG_EXCERPT_WORDS)
            );
            mock_quiz(text, max_questions)
        }
        Err(err) => {
            warn!(
                "quiz: provider failed for {:?} ({}), using local quiz",
                first_words_excerpt(text, LOG_EXCERPT_WORDS),
                err
            );
            mock_quiz(text, max_questions)
        }
    }
}

pub fn judge_or_substring<P: QuizProvider>(
    provider: &mut P,
    question: &str,
    expected: &str,
    answer: &str,
) -> Judgment {
    provider
        .judge(question, expected, answer)
        .unwrap_or_else(|err| {
            warn!("quiz: judge failed ({}), comparing answers locally", err);
            judge_by_substring(expected, answer)
        })
}

/// Build fill-in-the-blank questions: each usable sentence loses its longest
/// word, and key words of other sentences serve as distractors.
pub fn mock_quiz(text: &str, max_questions: usize) -> Quiz {
    let sentences = sentences(&segment(text));
    let keys: Vec<Option<(usize, String)>> = sentences.iter().map(|s| key_word(s)).collect();

    let mut questions = Vec::new();
    for (sentence_index, (sentence, key)) in sentences.iter().zip(&keys).enumerate() {
        if questions.len() >= max_questions {
            break;
        }
        let Some((word_index, answer)) = key else {
            continue;
        };

        let mut options: Vec<String> = Vec::with_capacity(MAX_OPTIONS);
        options.push(answer.clone());
        for (other_index, other) in keys.iter().enumerate() {
            if options.len() >= MAX_OPTIONS {
                break;
            }
            let Some((_, candidate)) = other else {
                continue;
            };
            if other_index != sentence_index
                && !options.iter().any(|o| o.to_lowercase() == candidate.to_lowercase())
            {
                options.push(candidate.clone());
            }
        }

        // Rotate the answer into a position that varies per question.
        let answer_index = questions.len() % options.len();
        options.swap(0, answer_index);

        let prompt = sentence
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i == *word_index {
                    blank_out(word, answer)
                } else {
                    word.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        questions.push(QuizQuestion {
            prompt,
            options,
            answer_index,
        });
    }

    Quiz { questions }
}

/// Case-insensitive containment either way; blank answers are wrong.
pub fn judge_by_substring(expected: &str, answer: &str) -> Judgment {
    let expected_norm = expected.trim().to_lowercase();
    let answer_norm = answer.trim().to_lowercase();

    let correct = !expected_norm.is_empty()
        && !answer_norm.is_empty()
        && (answer_norm.contains(&expected_norm) || expected_norm.contains(&answer_norm));

    let feedback = if correct {
        String::from("Correct.")
    } else {
        format!("Not quite. The expected answer was \"{}\".", expected.trim())
    };

    Judgment { correct, feedback }
}

fn sentences(words: &[String]) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for word in words {
        current.push(word.clone());
        if ends_sentence(word) {
            out.push(core::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Longest alphabetic word of a sentence, with its position.
fn key_word(sentence: &[String]) -> Option<(usize, String)> {
    if sentence.len() < MIN_SENTENCE_WORDS {
        return None;
    }

    let mut best: Option<(usize, &str)> = None;
    for (index, word) in sentence.iter().enumerate() {
        let core = strip_punctuation(word);
        let len = core.chars().count();
        if len < MIN_KEY_WORD_CHARS || !core.chars().all(char::is_alphabetic) {
            continue;
        }
        if best.is_none_or(|(_, current)| len > current.chars().count()) {
            best = Some((index, core));
        }
    }

    best.map(|(index, word)| (index, String::from(word)))
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Replace the key word inside its token, keeping attached punctuation.
fn blank_out(token: &str, key: &str) -> String {
    match token.find(key) {
        Some(start) => format!("{}{}{}", &token[..start], BLANK, &token[start + key.len()..]),
        None => String::from(BLANK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The quick brown fox jumped over the lazy dog. \
Afterwards the animals rested beside the river. \
Everyone agreed that the afternoon was remarkably peaceful.";

    struct FailingProvider;

    impl QuizProvider for FailingProvider {
        type Error = &'static str;

        fn generate(&mut self, _text: &str, _max: usize) -> Result<Quiz, Self::Error> {
            Err("network down")
        }

        fn judge(&mut self, _q: &str, _e: &str, _a: &str) -> Result<Judgment, Self::Error> {
            Err("network down")
        }
    }

    #[test]
    fn mock_quiz_blanks_longest_word() {
        let quiz = mock_quiz(TEXT, 3);
        assert_eq!(quiz.questions.len(), 3);

        let first = &quiz.questions[0];
        assert_eq!(first.answer(), Some("jumped"));
        assert_eq!(first.prompt, "The quick brown fox _____ over the lazy dog.");

        let second = &quiz.questions[1];
        assert_eq!(second.answer(), Some("Afterwards"));
        assert!(second.prompt.starts_with("_____ the animals"));

        let third = &quiz.questions[2];
        assert_eq!(third.answer(), Some("remarkably"));
        assert!(third.prompt.ends_with("_____ peaceful."));
    }

    #[test]
    fn mock_quiz_options_hold_distinct_distractors() {
        let quiz = mock_quiz(TEXT, 3);
        for question in &quiz.questions {
            assert_eq!(question.options.len(), 3);
            let answer = question.answer().unwrap();
            assert_eq!(question.options.iter().filter(|o| *o == answer).count(), 1);
        }
        assert_eq!(quiz.questions[1].answer_index, 1);
    }

    #[test]
    fn mock_quiz_respects_limit_and_short_text() {
        assert_eq!(mock_quiz(TEXT, 1).questions.len(), 1);
        assert!(mock_quiz("Too short.", 3).questions.is_empty());
        assert!(mock_quiz("", 3).questions.is_empty());
    }

    #[test]
    fn substring_judgment() {
        assert!(judge_by_substring("jumped", "it JUMPED").correct);
        assert!(judge_by_substring("the river bank", "river").correct);
        assert!(!judge_by_substring("jumped", "slept").correct);
        assert!(!judge_by_substring("jumped", "   ").correct);
        let wrong = judge_by_substring("jumped", "slept");
        assert!(wrong.feedback.contains("\"jumped\""));
    }

    #[test]
    fn failing_provider_falls_back_to_local() {
        let quiz = generate_or_mock(&mut FailingProvider, TEXT, 2);
        assert_eq!(quiz, mock_quiz(TEXT, 2));

        let judgment = judge_or_substring(&mut FailingProvider, "q", "dog", "a lazy dog");
        assert!(judgment.correct);
    }

    #[test]
    fn local_provider_matches_fallbacks() {
        let mut provider = LocalQuizProvider;
        assert_eq!(generate_or_mock(&mut provider, TEXT, 3), mock_quiz(TEXT, 3));
    }
}
