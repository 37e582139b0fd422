use super::{load_env_file, BackendConfig, ConfigError, Settings};
use std::collections::BTreeMap;
use std::path::Path;

/// Defaults, then the settings file, then the process environment with
/// `env_file` entries filling in anything the environment leaves unset.
pub fn load_backend_config(
    settings_path: Option<&Path>,
    env_file: Option<&Path>,
) -> Result<BackendConfig, ConfigError> {
    let mut config = BackendConfig::default();
    if let Some(path) = settings_path {
        config = config.with_settings(&Settings::from_path(path)?);
    }
    let file_values = match env_file {
        Some(path) => load_env_file(path)?,
        None => BTreeMap::new(),
    };
    config.with_overrides(|key| {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| file_values.get(key).cloned())
    })
}
