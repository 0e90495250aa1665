use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BcdevError {
    // Config errors
    #[error("CONFIG_NOT_FOUND: config file '{path}' does not exist")]
    ConfigNotFound { path: PathBuf },

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Request errors
    #[error("INVALID_REQUEST: {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for BcdevError {
    fn from(err: serde_json::Error) -> Self {
        BcdevError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, BcdevError>;
