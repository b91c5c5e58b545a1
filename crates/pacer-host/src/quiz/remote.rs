use log::debug;
use pacer_core::quiz::{Judgment, Quiz, QuizProvider, QuizQuestion};
use thiserror::Error;

use super::wire::{
    CompletionRequest, CompletionResponse, QUIZ_INSTRUCTIONS, QuizRecord, judge_instructions,
};

/// Raw HTTP answer from the completion endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one JSON body to the completion endpoint. Authentication headers
/// are the transport's business.
pub trait CompletionTransport {
    fn post_json(&mut self, body: &str) -> Result<TransportResponse, String>;
}

#[derive(Debug, Error)]
pub enum QuizClientError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service answered HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response is missing {0}")]
    MissingField(&'static str),
    #[error("question {0} has no option at its answer index")]
    BadAnswerIndex(usize),
}

pub struct RemoteQuizProvider<T: CompletionTransport> {
    transport: T,
    model: String,
    api_key: Option<String>,
}

impl<T: CompletionTransport> RemoteQuizProvider<T> {
    pub fn new(transport: T, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn complete(&mut self, instructions: &str, text: &str) -> Result<String, QuizClientError> {
        if self.api_key.is_none() {
            return Err(QuizClientError::MissingApiKey);
        }

        let body = serde_json::to_string(&CompletionRequest::new(&self.model, instructions, text))?;
        let response = self
            .transport
            .post_json(&body)
            .map_err(QuizClientError::Transport)?;
        if !(200..300).contains(&response.status) {
            return Err(QuizClientError::Status(response.status));
        }

        let parsed: CompletionResponse = serde_json::from_str(&response.body)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(QuizClientError::MissingField("choices[0].message.content"))?;

        debug!("quiz: completion returned {} bytes", content.len());
        Ok(content)
    }
}

impl<T: CompletionTransport> QuizProvider for RemoteQuizProvider<T> {
    type Error = QuizClientError;

    fn generate(&mut self, text: &str, max_questions: usize) -> Result<Quiz, Self::Error> {
        let instructions = QUIZ_INSTRUCTIONS.replace("{max}", &max_questions.to_string());
        let content = self.complete(&instructions, text)?;
        let record: QuizRecord = serde_json::from_str(strip_code_fence(&content))?;

        let mut questions = Vec::with_capacity(record.questions.len().min(max_questions));
        for (index, question) in record.questions.into_iter().take(max_questions).enumerate() {
            if question.answer_index >= question.options.len() {
                return Err(QuizClientError::BadAnswerIndex(index));
            }
            questions.push(QuizQuestion {
                prompt: question.question,
                options: question.options,
                answer_index: question.answer_index,
            });
        }

        Ok(Quiz { questions })
    }

    fn judge(
        &mut self,
        question: &str,
        expected: &str,
        answer: &str,
    ) -> Result<Judgment, Self::Error> {
        let content = self.complete(&judge_instructions(question, expected), answer)?;
        let feedback = content.trim().to_string();
        let verdict = feedback.to_lowercase();

        Ok(Judgment {
            correct: verdict.starts_with("correct") || verdict.starts_with("yes"),
            feedback,
        })
    }
}

/// Models sometimes wrap JSON in a markdown fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
