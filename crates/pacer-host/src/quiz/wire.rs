//! JSON bodies exchanged with the chat-completion endpoint.

use serde::{Deserialize, Serialize};

pub const QUIZ_INSTRUCTIONS: &str = "You write short reading-comprehension quizzes. \
Reply with JSON only, shaped as {\"questions\": [{\"question\": string, \
\"options\": [string], \"answerIndex\": number}]}. Ask at most {max} questions \
about the text the user sends.";

pub fn judge_instructions(question: &str, expected: &str) -> String {
    format!(
        "You grade a reader's answer. Question: {question}\nExpected answer: {expected}\n\
Start your reply with \"Correct\" or \"Incorrect\", then give one sentence of feedback."
    )
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, instructions: &'a str, text: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuizRecord {
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}
