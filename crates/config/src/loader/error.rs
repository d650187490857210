//! Error types for configuration loading.
//!
//! Invariants:
//! - Variants name the offending variable or setting.
//! - Dotenv errors never include raw `.env` line contents, which may hold secrets.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error(
        "Either an auth URL (OS_AUTH_URL) or a token and endpoint (OS_SERVICE_TOKEN, OS_SERVICE_ENDPOINT) is required"
    )]
    MissingAuthSource,

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("client certificate and key must be provided together (missing {missing})")]
    IncompleteClientCert { missing: &'static str },

    /// SAFETY: only the byte index of the parse failure is kept.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
