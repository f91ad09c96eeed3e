use thiserror::Error;

pub mod core_config;

#[cfg(test)]
mod test;

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Config parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parsing(#[from] ConfigParsingError),
    #[error("Missing `{field}`: provide it in the configuration or via the `{env}` environment variable")]
    MissingCredential {
        field: &'static str,
        env: &'static str,
    },
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}
