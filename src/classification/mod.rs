pub mod parse;

use serde::Serialize;
use serde_json::{Map, Value};

pub use parse::{decode_object, parse_classification, DecodeStrategy, ModelOutput};

pub const REQUIRED_FIELDS: [&str; 3] = ["intent", "topic", "sentiment"];

/// Model output that carries every required field. Values are passed
/// through untouched: neither type nor vocabulary is checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Classification {
    fields: Map<String, Value>,
}

impl Classification {
    pub(crate) fn from_validated(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn intent(&self) -> Option<&str> {
        self.get("intent").and_then(Value::as_str)
    }

    pub fn topic(&self) -> Option<&str> {
        self.get("topic").and_then(Value::as_str)
    }

    pub fn sentiment(&self) -> Option<&str> {
        self.get("sentiment").and_then(Value::as_str)
    }

    pub fn categorization(&self) -> Option<&str> {
        self.get("categorization").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}
