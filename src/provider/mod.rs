pub mod ollama;
pub mod output_parse;

use crate::prompt::PromptTurn;
use crate::shared::ClassifyError;
use std::time::Instant;

pub use ollama::OllamaClient;
pub use output_parse::{extract_content, ChatOptions, ChatRequestBody};

/// A text-generation backend reachable with one blocking call.
///
/// `deadline` lets the caller bound the call; `None` waits as long as the
/// backend's own configuration allows.
pub trait ChatBackend: Send + Sync {
    fn chat(
        &self,
        turns: &[PromptTurn],
        deadline: Option<Instant>,
    ) -> Result<String, ClassifyError>;
}

impl<T: ChatBackend + ?Sized> ChatBackend for Box<T> {
    fn chat(
        &self,
        turns: &[PromptTurn],
        deadline: Option<Instant>,
    ) -> Result<String, ClassifyError> {
        (**self).chat(turns, deadline)
    }
}

impl<T: ChatBackend + ?Sized> ChatBackend for std::sync::Arc<T> {
    fn chat(
        &self,
        turns: &[PromptTurn],
        deadline: Option<Instant>,
    ) -> Result<String, ClassifyError> {
        (**self).chat(turns, deadline)
    }
}
