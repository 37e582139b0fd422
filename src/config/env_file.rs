use super::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;

/// Reads a dotenv file into a map without touching the process environment.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let env_error = |source: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };
    let mut values = BTreeMap::new();
    for item in dotenvy::from_path_iter(path).map_err(env_error)? {
        let (key, value) = item.map_err(env_error)?;
        values.insert(key, value);
    }
    Ok(values)
}
