use super::{ConfigError, Settings};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_NUM_PREDICT: u32 = 700;

pub const ENDPOINT_ENV: &str = "OLLAMA_ENDPOINT";
pub const MODEL_ENV: &str = "OLLAMA_MODEL";
pub const TIMEOUT_ENV: &str = "OLLAMA_TIMEOUT_SECS";

/// Where and how to reach the chat backend. A missing model is not a load
/// error; the client refuses to call out without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub model: Option<String>,
    pub num_predict: u32,
    /// `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: None,
            num_predict: DEFAULT_NUM_PREDICT,
            timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Some(endpoint) = non_blank(settings.endpoint.as_deref()) {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_blank(settings.model.as_deref()) {
            self.model = Some(model);
        }
        if let Some(num_predict) = settings.num_predict {
            self.num_predict = num_predict;
        }
        if let Some(secs) = settings.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// Applies `OLLAMA_*` values from `lookup`; blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = non_blank(lookup(ENDPOINT_ENV).as_deref()) {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_blank(lookup(MODEL_ENV).as_deref()) {
            self.model = Some(model);
        }
        if let Some(raw) = non_blank(lookup(TIMEOUT_ENV).as_deref()) {
            let secs = raw
                .parse::<u64>()
                .map_err(|err| ConfigError::InvalidValue {
                    key: TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                    reason: err.to_string(),
                })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint.trim_end_matches('/'))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
