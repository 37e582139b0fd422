use crate::conversation::roles::normalize_role;
use crate::shared::ClassifyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CONVERSATION_NUMBER_KEY: &str = "conversation_number";
pub const MESSAGES_KEY: &str = "messages";
pub const TWEETS_KEY: &str = "tweets";

/// Canonical `{sender, text}` entry every accepted input shape converges to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Loosely-typed social-media style event. Fields beyond `role` and `text`
/// (ids, timestamps, author handles) are ignored, and a `role` that is not a
/// string reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub role: Option<String>,
    pub text: Option<String>,
}

impl RawEvent {
    /// `None` when the entry is not an object at all.
    pub fn from_value(value: &Value) -> Option<Self> {
        let event = value.as_object()?;
        let field = |key: &str| event.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            role: field("role"),
            text: field("text"),
        })
    }

    /// Converts to a canonical message, or `None` when there is no text to keep.
    pub fn into_message(self) -> Option<Message> {
        let text = self.text.filter(|text| !text.is_empty())?;
        let sender = normalize_role(self.role.as_deref());
        Some(Message::new(sender.as_str(), text))
    }
}

/// The two accepted message collections, resolved once from the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationPayload {
    /// `messages`: already-typed `{sender, text}` entries, validated fail-fast.
    LegacyMessages(Vec<Value>),
    /// `tweets`: raw `{role, text, ...}` events, validated permissively.
    RawEvents(Vec<Value>),
}

impl ConversationPayload {
    /// `tweets` wins over `messages` when both are present; `null` counts as absent.
    pub fn resolve(request: &Map<String, Value>) -> Result<Self, ClassifyError> {
        if let Some(tweets) = present(request, TWEETS_KEY) {
            return match tweets.as_array() {
                Some(events) if !events.is_empty() => Ok(Self::RawEvents(events.clone())),
                _ => Err(ClassifyError::EmptyTweets),
            };
        }
        match present(request, MESSAGES_KEY).and_then(Value::as_array) {
            Some(messages) if !messages.is_empty() => Ok(Self::LegacyMessages(messages.clone())),
            _ => Err(ClassifyError::EmptyMessages),
        }
    }
}

/// Validated inbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRequest {
    pub conversation_number: String,
    pub payload: ConversationPayload,
}

impl ConversationRequest {
    pub fn from_value(value: &Value) -> Result<Self, ClassifyError> {
        let request = value.as_object().ok_or(ClassifyError::NotAnObject)?;
        let conversation_number = match present(request, CONVERSATION_NUMBER_KEY) {
            None => return Err(ClassifyError::MissingRequiredFields),
            Some(Value::String(number)) => number.clone(),
            Some(_) => return Err(ClassifyError::ConversationNumberNotString),
        };
        if present(request, TWEETS_KEY).is_none() && present(request, MESSAGES_KEY).is_none() {
            return Err(ClassifyError::MissingRequiredFields);
        }
        let payload = ConversationPayload::resolve(request)?;
        Ok(Self {
            conversation_number,
            payload,
        })
    }
}

fn present<'a>(request: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    request.get(key).filter(|value| !value.is_null())
}
