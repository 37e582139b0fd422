use serde::Serialize;

/// Broad failure category, used by front ends to pick a status or exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InputShape,
    BackendUnavailable,
    BackendOutput,
    Configuration,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputShape => "input_shape",
            Self::BackendUnavailable => "backend_unavailable",
            Self::BackendOutput => "backend_output",
            Self::Configuration => "configuration",
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            Self::InputShape => 400,
            Self::BackendUnavailable => 502,
            Self::BackendOutput | Self::Configuration => 500,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::InputShape => 2,
            Self::BackendUnavailable => 3,
            Self::BackendOutput => 4,
            Self::Configuration => 5,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every way a classification request can fail. `Display` is the message
/// handed back to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Invalid input: not a JSON object")]
    NotAnObject,
    #[error("Missing required fields: conversation_number or messages")]
    MissingRequiredFields,
    #[error("Invalid input: conversation_number must be a string")]
    ConversationNumberNotString,
    #[error("Messages must be a non-empty list")]
    EmptyMessages,
    #[error("Tweets must be a non-empty list")]
    EmptyTweets,
    #[error("Message at index {index} is not an object")]
    MessageNotObject { index: usize },
    #[error("Missing text in message at index {index}")]
    MissingText { index: usize },
    #[error("All tweets have empty text")]
    AllTweetsEmpty,
    #[error("Invalid input: conversation_number and aggregated_text are required")]
    PromptInputMissing,
    #[error("Model not configured: OLLAMA_MODEL environment variable not set")]
    ModelNotConfigured,
    #[error("LLM request timed out")]
    Timeout,
    #[error("LLM connectivity error")]
    Connectivity { detail: String },
    #[error("LLM error")]
    Unclassified { detail: String },
    #[error("Empty LLM response content")]
    EmptyContent,
    #[error("Empty LLM response")]
    EmptyResponse,
    #[error("Failed to parse LLM response as JSON")]
    Unparsable,
    #[error("Classification must be a JSON object")]
    NotAClassificationObject,
    #[error("Missing field in classification: {0}")]
    MissingField(&'static str),
}

impl ClassifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAnObject
            | Self::MissingRequiredFields
            | Self::ConversationNumberNotString
            | Self::EmptyMessages
            | Self::EmptyTweets
            | Self::MessageNotObject { .. }
            | Self::MissingText { .. }
            | Self::AllTweetsEmpty
            | Self::PromptInputMissing => ErrorKind::InputShape,
            Self::ModelNotConfigured => ErrorKind::Configuration,
            Self::Timeout | Self::Connectivity { .. } => ErrorKind::BackendUnavailable,
            Self::Unclassified { .. }
            | Self::EmptyContent
            | Self::EmptyResponse
            | Self::Unparsable
            | Self::NotAClassificationObject
            | Self::MissingField(_) => ErrorKind::BackendOutput,
        }
    }

    /// Underlying transport or decode error text, kept out of the caller-facing message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Connectivity { detail } | Self::Unclassified { detail } => Some(detail),
            _ => None,
        }
    }

    pub fn to_body(&self) -> FailureBody {
        FailureBody {
            error: self.to_string(),
        }
    }
}

/// Wire shape of every failure: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureBody {
    pub error: String,
}
