use convclass::config::{
    load_backend_config, load_env_file, BackendConfig, ConfigError, Settings, DEFAULT_ENDPOINT,
    DEFAULT_NUM_PREDICT, ENDPOINT_ENV, MODEL_ENV, TIMEOUT_ENV,
};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    move |key| values.get(key).cloned()
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[test]
fn defaults_point_at_local_backend_without_model() {
    let config = BackendConfig::from_lookup(lookup(&[])).expect("config");
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.endpoint, "http://localhost:11434");
    assert_eq!(config.model, None);
    assert_eq!(config.num_predict, DEFAULT_NUM_PREDICT);
    assert_eq!(config.timeout, None);
    assert_eq!(config.chat_url(), "http://localhost:11434/api/chat");
}

#[test]
fn environment_values_override_defaults() {
    let config = BackendConfig::from_lookup(lookup(&[
        (ENDPOINT_ENV, "http://gpu-box:11434/"),
        (MODEL_ENV, "llama3:8b"),
        (TIMEOUT_ENV, "45"),
    ]))
    .expect("config");
    assert_eq!(config.model.as_deref(), Some("llama3:8b"));
    assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    assert_eq!(config.chat_url(), "http://gpu-box:11434/api/chat");
}

#[test]
fn blank_environment_values_are_ignored() {
    let config = BackendConfig::from_lookup(lookup(&[
        (ENDPOINT_ENV, "   "),
        (MODEL_ENV, ""),
        (TIMEOUT_ENV, " "),
    ]))
    .expect("config");
    assert_eq!(config, BackendConfig::default());
}

#[test]
fn malformed_timeout_is_rejected() {
    let err = BackendConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).expect_err("invalid");
    match err {
        ConfigError::InvalidValue { key, value, .. } => {
            assert_eq!(key, TIMEOUT_ENV);
            assert_eq!(value, "soon");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn settings_file_is_layered_under_environment() {
    let settings = Settings::from_yaml(
        "endpoint: http://settings-host:11434\nmodel: mistral\nnum_predict: 256\ntimeout_secs: 10\n",
    )
    .expect("settings");
    let config = BackendConfig::default()
        .with_settings(&settings)
        .with_overrides(lookup(&[(MODEL_ENV, "llama3")]))
        .expect("config");

    assert_eq!(config.endpoint, "http://settings-host:11434");
    assert_eq!(config.model.as_deref(), Some("llama3"));
    assert_eq!(config.num_predict, 256);
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn settings_file_is_read_from_disk() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("convclass.yaml");
    fs::write(&path, "model: phi3\n").expect("write settings");

    let settings = Settings::from_path(&path).expect("settings");
    assert_eq!(settings.model.as_deref(), Some("phi3"));
    assert_eq!(settings.endpoint, None);
}

#[test]
fn unreadable_or_invalid_settings_name_the_file() {
    let temp = tempdir().expect("tempdir");
    let missing = temp.path().join("missing.yaml");
    let err = Settings::from_path(&missing).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.yaml"));

    let invalid = temp.path().join("invalid.yaml");
    fs::write(&invalid, "model: [unterminated\n").expect("write settings");
    let err = Settings::from_path(&invalid).expect_err("invalid");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn env_file_reads_comments_exports_and_quotes() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join(".env");
    fs::write(
        &path,
        "# backend\nexport OLLAMA_MODEL=\"llama3\"\nOLLAMA_ENDPOINT='http://gpu:11434'\n\n",
    )
    .expect("write env");

    let values = load_env_file(&path).expect("env file");
    assert_eq!(values["OLLAMA_MODEL"], "llama3");
    assert_eq!(values["OLLAMA_ENDPOINT"], "http://gpu:11434");
}

#[test]
fn env_file_reports_bad_lines() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join(".env");
    fs::write(&path, "OLLAMA_MODEL=llama3\nnot a pair\n").expect("write env");

    let err = load_env_file(&path).expect_err("bad line");
    assert!(matches!(err, ConfigError::EnvFile { .. }));
    assert!(err.to_string().contains(".env"));
}

#[test]
fn missing_env_file_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let err = load_env_file(&temp.path().join("absent.env")).expect_err("missing");
    assert!(matches!(err, ConfigError::EnvFile { .. }));
}

#[test]
fn env_file_fills_in_what_the_environment_leaves_unset() {
    let temp = tempdir().expect("tempdir");
    let settings = temp.path().join("settings.yaml");
    fs::write(&settings, "num_predict: 128\n").expect("write settings");
    let env_file = temp.path().join(".env");
    fs::write(
        &env_file,
        "OLLAMA_MODEL=from-env-file\nOLLAMA_ENDPOINT=http://env-file-host:11434\n",
    )
    .expect("write env");

    let config = load_backend_config(Some(&settings), Some(&env_file)).expect("config");

    assert_eq!(config.num_predict, 128);
    assert_eq!(
        config.model,
        Some(process_env(MODEL_ENV).unwrap_or_else(|| "from-env-file".to_string()))
    );
    assert_eq!(
        config.endpoint,
        process_env(ENDPOINT_ENV).unwrap_or_else(|| "http://env-file-host:11434".to_string())
    );
}
