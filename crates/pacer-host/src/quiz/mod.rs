//! Quiz generation through a third-party completion service.

mod remote;
mod wire;

pub use remote::{CompletionTransport, QuizClientError, RemoteQuizProvider, TransportResponse};
pub use wire::{ChatMessage, CompletionRequest, QUIZ_INSTRUCTIONS, judge_instructions};
