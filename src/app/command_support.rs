use crate::app::cli::CliOptions;
use crate::config::{load_backend_config, BackendConfig, ConfigError};
use crate::pipeline::Classifier;
use crate::provider::OllamaClient;
use crate::shared::{EventLog, JsonlLog, TracingLog};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

pub type CliClassifier = Classifier<OllamaClient, Vec<Box<dyn EventLog>>>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Write { .. } => 1,
            Self::Read { .. } | Self::Json { .. } => 2,
            Self::Config(_) => 5,
        }
    }
}

/// What the binary prints and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub stdout: String,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CommandOutcome {
    pub fn ok(stdout: String) -> Self {
        Self {
            stdout,
            stderr: None,
            exit_code: 0,
        }
    }
}

/// Config file and environment per [`load_backend_config`], then `--timeout-secs`.
pub fn resolve_backend_config(options: &CliOptions) -> Result<BackendConfig, CliError> {
    let mut config =
        load_backend_config(options.config.as_deref(), options.env_file.as_deref())?;
    if let Some(secs) = options.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }
    Ok(config)
}

pub fn build_classifier(options: &CliOptions) -> Result<CliClassifier, CliError> {
    let config = resolve_backend_config(options)?;
    let mut sinks: Vec<Box<dyn EventLog>> = vec![Box::new(TracingLog)];
    if let Some(path) = &options.log_file {
        sinks.push(Box::new(JsonlLog::new(path)));
    }
    Ok(Classifier::new(OllamaClient::new(config), sinks))
}

pub fn single_input_path(options: &CliOptions, usage: &str) -> Result<String, CliError> {
    match options.positional.as_slice() {
        [path] => Ok(path.clone()),
        _ => Err(CliError::Usage(usage.to_string())),
    }
}

/// Reads JSON from a file, or from stdin when `source` is `-`.
pub fn read_json_input(source: &str) -> Result<Value, CliError> {
    let raw = if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        raw
    } else {
        std::fs::read_to_string(Path::new(source)).map_err(|err| CliError::Read {
            path: source.to_string(),
            source: err,
        })?
    };
    serde_json::from_str(&raw).map_err(|err| CliError::Json {
        path: source.to_string(),
        source: err,
    })
}

pub fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
