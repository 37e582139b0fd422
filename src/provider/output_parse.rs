use crate::prompt::PromptTurn;
use crate::shared::ClassifyError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub num_predict: u32,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestBody<'a> {
    pub model: &'a str,
    pub messages: &'a [PromptTurn],
    pub options: ChatOptions,
    pub stream: bool,
}

/// Pulls the generated text out of a chat response envelope.
///
/// Two layouts are accepted: `{"message": {"content": ...}}` and
/// `{"messages": [{"content": ...}, ...]}`. When `message` is present it
/// wins, even if its content is empty.
pub fn extract_content(envelope: &Value) -> Result<String, ClassifyError> {
    let content = match envelope.get("message") {
        Some(message) => message.get("content").and_then(Value::as_str),
        None => envelope
            .get("messages")
            .and_then(Value::as_array)
            .and_then(|messages| messages.first())
            .and_then(|first| first.get("content"))
            .and_then(Value::as_str),
    };

    let trimmed = content.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::EmptyContent);
    }
    Ok(trimmed.to_string())
}
