use super::{Classification, REQUIRED_FIELDS};
use crate::shared::ClassifyError;
use serde_json::{Map, Value};

/// What the backend handed back: raw text, or data some collaborator
/// already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Text(String),
    Structured(Value),
}

impl From<&str> for ModelOutput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ModelOutput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for ModelOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Strict,
    /// Substring from the first `{` to the last `}`. Naive on purpose: braces
    /// inside surrounding prose can throw the bounds off.
    BraceSpan,
}

/// Strict decode first, then the brace-span fallback.
pub fn decode_object(text: &str) -> Option<(Value, DecodeStrategy)> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some((value, DecodeStrategy::Strict));
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str::<Value>(&text[start..=end])
        .ok()
        .map(|value| (value, DecodeStrategy::BraceSpan))
}

pub fn parse_classification(
    output: impl Into<ModelOutput>,
) -> Result<Classification, ClassifyError> {
    let value = match output.into() {
        ModelOutput::Text(text) => {
            if text.trim().is_empty() {
                return Err(ClassifyError::EmptyResponse);
            }
            let (value, _) = decode_object(&text).ok_or(ClassifyError::Unparsable)?;
            value
        }
        ModelOutput::Structured(Value::Null) => return Err(ClassifyError::EmptyResponse),
        ModelOutput::Structured(value) => value,
    };

    let Value::Object(object) = value else {
        return Err(ClassifyError::NotAClassificationObject);
    };
    if object.is_empty() {
        return Err(ClassifyError::EmptyResponse);
    }
    let record = unwrap_nested(object)?;
    for field in REQUIRED_FIELDS {
        if !record.contains_key(field) {
            return Err(ClassifyError::MissingField(field));
        }
    }
    Ok(Classification::from_validated(record))
}

// Backends sometimes answer `{"classification": {...}}` instead of the bare object.
fn unwrap_nested(mut object: Map<String, Value>) -> Result<Map<String, Value>, ClassifyError> {
    match object.remove("classification") {
        None => Ok(object),
        Some(Value::Object(nested)) => Ok(nested),
        Some(_) => Err(ClassifyError::NotAClassificationObject),
    }
}
