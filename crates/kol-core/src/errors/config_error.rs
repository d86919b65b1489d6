use std::path::PathBuf;

/// Failures while reading or validating a `KolConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    #[error("invalid value for `{field}`: {message}")]
    InvalidValue { field: &'static str, message: String },
}
