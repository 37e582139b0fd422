use crate::conversation::request::{ConversationPayload, ConversationRequest, Message, RawEvent};
use crate::shared::ClassifyError;
use serde::Serialize;
use serde_json::Value;

/// One conversation reduced to a single text blob plus its canonical messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedConversation {
    pub conversation_number: String,
    pub aggregated_text: String,
    pub messages: Vec<Message>,
}

pub fn aggregate(request: &ConversationRequest) -> Result<AggregatedConversation, ClassifyError> {
    let messages = match &request.payload {
        ConversationPayload::RawEvents(events) => collect_raw_events(events)?,
        ConversationPayload::LegacyMessages(entries) => collect_legacy_messages(entries)?,
    };
    let aggregated_text = messages
        .iter()
        .map(|message| message.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(AggregatedConversation {
        conversation_number: request.conversation_number.clone(),
        aggregated_text,
        messages,
    })
}

// Permissive: anything that does not yield text is skipped.
fn collect_raw_events(events: &[Value]) -> Result<Vec<Message>, ClassifyError> {
    if events.is_empty() {
        return Err(ClassifyError::EmptyTweets);
    }
    let messages = events
        .iter()
        .filter_map(RawEvent::from_value)
        .filter_map(RawEvent::into_message)
        .collect::<Vec<_>>();
    if messages.is_empty() {
        return Err(ClassifyError::AllTweetsEmpty);
    }
    Ok(messages)
}

// Fail-fast: the first malformed entry aborts the whole request.
fn collect_legacy_messages(entries: &[Value]) -> Result<Vec<Message>, ClassifyError> {
    if entries.is_empty() {
        return Err(ClassifyError::EmptyMessages);
    }
    let mut messages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry = entry
            .as_object()
            .ok_or(ClassifyError::MessageNotObject { index })?;
        let text = entry
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or(ClassifyError::MissingText { index })?;
        let sender = entry
            .get("sender")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        messages.push(Message::new(sender, text));
    }
    Ok(messages)
}
