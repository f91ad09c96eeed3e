use std::path::PathBuf;

use asc_core::MaterialError;
use asc_core::config::{ConfigError, ConfigParsingError};
use asc_core::service::error::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ConfigParsing(#[from] ConfigParsingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error("Failed to read `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid state file: {0}")]
    State(#[source] serde_json::Error),
    #[error("Failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
