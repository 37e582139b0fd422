use crate::config::BackendConfig;
use crate::prompt::PromptTurn;
use crate::provider::output_parse::{extract_content, ChatOptions, ChatRequestBody};
use crate::provider::ChatBackend;
use crate::shared::ClassifyError;
use serde_json::Value;
use std::error::Error as _;
use std::time::{Duration, Instant};

/// Blocking client for an Ollama-compatible `/api/chat` endpoint. One call
/// per request, no retries.
#[derive(Clone)]
pub struct OllamaClient {
    config: BackendConfig,
    agent: ureq::Agent,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OllamaClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    // The tighter of the configured timeout and whatever is left before the deadline.
    fn effective_timeout(
        &self,
        deadline: Option<Instant>,
    ) -> Result<Option<Duration>, ClassifyError> {
        let remaining = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(ClassifyError::Timeout);
                }
                Some(remaining)
            }
            None => None,
        };
        Ok(match (self.config.timeout, remaining) {
            (Some(configured), Some(remaining)) => Some(configured.min(remaining)),
            (configured, remaining) => configured.or(remaining),
        })
    }
}

impl ChatBackend for OllamaClient {
    fn chat(
        &self,
        turns: &[PromptTurn],
        deadline: Option<Instant>,
    ) -> Result<String, ClassifyError> {
        let model = self
            .config
            .model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .ok_or(ClassifyError::ModelNotConfigured)?;
        let timeout = self.effective_timeout(deadline)?;

        let body = ChatRequestBody {
            model,
            messages: turns,
            options: ChatOptions {
                num_predict: self.config.num_predict,
            },
            stream: false,
        };
        let payload = serde_json::to_value(&body).map_err(|e| ClassifyError::Unclassified {
            detail: format!("failed to encode chat request: {e}"),
        })?;

        let url = self.config.chat_url();
        let mut request = self.agent.post(&url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send_json(payload)
            .map_err(|err| classify_transport(&url, err))?;

        let envelope = response
            .into_json::<Value>()
            .map_err(|e| ClassifyError::Unclassified {
                detail: format!("invalid response body from {url}: {e}"),
            })?;
        extract_content(&envelope)
    }
}

fn classify_transport(url: &str, err: ureq::Error) -> ClassifyError {
    match err {
        ureq::Error::Status(status, _) => ClassifyError::Connectivity {
            detail: format!("{url} returned status {status}"),
        },
        ureq::Error::Transport(transport) => {
            if is_timeout(&transport) {
                ClassifyError::Timeout
            } else {
                ClassifyError::Connectivity {
                    detail: transport.to_string(),
                }
            }
        }
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    let io_timeout = transport
        .source()
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|io| {
            matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
        .unwrap_or(false);
    io_timeout || transport.to_string().contains("timed out")
}
