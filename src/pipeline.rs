use crate::classification::{parse_classification, Classification};
use crate::conversation::{aggregate, AggregatedConversation, ConversationRequest, Message};
use crate::prompt::{build_prompt, Prompt};
use crate::provider::ChatBackend;
use crate::shared::{ClassifyError, EventLog};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

/// Success payload: the recognised request fields plus the classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResponse {
    pub conversation_number: String,
    pub messages: Vec<Message>,
    pub classification: Classification,
}

impl ClassificationResponse {
    /// Wire form, built field by field so it cannot fail.
    pub fn to_value(&self) -> Value {
        let messages = self
            .messages
            .iter()
            .map(|message| json!({ "sender": message.sender, "text": message.text }))
            .collect::<Vec<_>>();
        json!({
            "conversation_number": self.conversation_number,
            "messages": messages,
            "classification": Value::Object(self.classification.fields().clone()),
        })
    }
}

/// Runs validate → aggregate → prompt → backend → parse, stopping at the
/// first failure and returning it unchanged.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
#[derive(Debug)]
pub struct Classifier<B, L> {
    backend: B,
    log: L,
}

impl<B: ChatBackend, L: EventLog> Classifier<B, L> {
    pub fn new(backend: B, log: L) -> Self {
        Self { backend, log }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn classify(&self, request: &Value) -> Result<ClassificationResponse, ClassifyError> {
        self.classify_until(request, None)
    }

    /// Like [`Classifier::classify`], but gives up on the backend call once
    /// `deadline` passes.
    pub fn classify_until(
        &self,
        request: &Value,
        deadline: Option<Instant>,
    ) -> Result<ClassificationResponse, ClassifyError> {
        self.log.info("request.received", &request.to_string());
        let (conversation, prompt) = self.compose(request)?;

        self.log.info(
            "backend.request",
            &format!(
                "sending {} turns: {}",
                prompt.len(),
                serde_json::to_string(&prompt).unwrap_or_default()
            ),
        );
        let content = self
            .backend
            .chat(prompt.turns(), deadline)
            .inspect_err(|err| self.fail("backend.failed", err))?;
        self.log.info("backend.response", &content);

        let classification = parse_classification(content)
            .inspect_err(|err| self.fail("classification.failed", err))?;
        self.log.info(
            "classification.parsed",
            &serde_json::to_string(&classification).unwrap_or_default(),
        );

        let response = ClassificationResponse {
            conversation_number: conversation.conversation_number,
            messages: conversation.messages,
            classification,
        };
        self.log.info("response.sent", &response.to_value().to_string());
        Ok(response)
    }

    /// Validation, aggregation and prompt construction, without touching the backend.
    pub fn compose(
        &self,
        request: &Value,
    ) -> Result<(AggregatedConversation, Prompt), ClassifyError> {
        let request = ConversationRequest::from_value(request)
            .inspect_err(|err| self.fail("request.invalid", err))?;

        let conversation =
            aggregate(&request).inspect_err(|err| self.fail("aggregate.failed", err))?;
        self.log.info(
            "aggregate.completed",
            &format!("Aggregated messages: {}", conversation.aggregated_text),
        );

        let prompt = build_prompt(
            &conversation.conversation_number,
            &conversation.aggregated_text,
        )
        .inspect_err(|err| self.fail("prompt.failed", err))?;
        self.log.info(
            "prompt.built",
            &format!(
                "conversation {} composed into {} turns",
                conversation.conversation_number,
                prompt.len()
            ),
        );
        Ok((conversation, prompt))
    }

    /// Wire-level entry point: the success payload, or `{"error": ...}`.
    pub fn respond(&self, request: &Value) -> Value {
        match self.classify(request) {
            Ok(response) => response.to_value(),
            Err(err) => json!({ "error": err.to_string() }),
        }
    }

    fn fail(&self, event: &str, err: &ClassifyError) {
        match err.detail() {
            Some(detail) => self.log.error(event, &format!("{err}: {detail}")),
            None => self.log.error(event, &err.to_string()),
        }
    }
}
