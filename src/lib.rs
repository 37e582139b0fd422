pub mod app;
pub mod classification;
pub mod config;
pub mod conversation;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod shared;

pub use classification::Classification;
pub use pipeline::{ClassificationResponse, Classifier};
pub use shared::{ClassifyError, ErrorKind};
