pub mod backend;
pub mod env_file;
pub mod error;
pub mod load;
pub mod settings;

pub use backend::{
    BackendConfig, DEFAULT_ENDPOINT, DEFAULT_NUM_PREDICT, ENDPOINT_ENV, MODEL_ENV, TIMEOUT_ENV,
};
pub use env_file::load_env_file;
pub use error::ConfigError;
pub use load::load_backend_config;
pub use settings::Settings;
