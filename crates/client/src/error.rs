//! Error types for the Keystone client.
//!
//! Responsibilities:
//! - Define one error type for authentication, transport and resource failures.
//! - Classify HTTP status codes into error kinds.
//!
//! Invariants:
//! - Error messages never contain passwords or tokens.
//! - `InsufficientCredentials` names every missing field, not just the first.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Keystone client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Not enough parameters to attempt authentication.
    #[error("Missing required credentials: {}", .missing.join(", "))]
    InsufficientCredentials { missing: Vec<&'static str> },

    /// Parameters are present but contradict each other.
    #[error("Invalid authentication parameters: {0}")]
    InvalidParameters(String),

    /// The identity service rejected the credentials (HTTP 401).
    #[error("Unauthorized at {url}: {message}")]
    Unauthorized { url: String, message: String },

    /// Authentication could not be completed or no usable token is available.
    #[error("Authorization failure: {0}")]
    AuthorizationFailure(String),

    /// The response is missing fields every valid response carries.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No catalog entry matches the requested service type, interface and region.
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    #[error("Bad request at {url}: {message}")]
    BadRequest { url: String, message: String },

    #[error("Forbidden at {url}: {message}")]
    Forbidden { url: String, message: String },

    #[error("Not found at {url}: {message}")]
    NotFound { url: String, message: String },

    #[error("Conflict at {url}: {message}")]
    Conflict { url: String, message: String },

    #[error("Server error ({status}) at {url}: {message}")]
    ServerError {
        status: u16,
        url: String,
        message: String,
    },

    /// Any other non-success status.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Too many redirects (limit {limit}) while requesting {url}")]
    TooManyRedirects { limit: usize, url: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// CA bundle or client identity could not be loaded.
    #[error("TLS configuration error: {0}")]
    Tls(String),
}

impl ClientError {
    /// Build the error matching a non-success HTTP status.
    pub fn from_status(status: u16, url: String, message: String) -> Self {
        match status {
            400 => Self::BadRequest { url, message },
            401 => Self::Unauthorized { url, message },
            403 => Self::Forbidden { url, message },
            404 => Self::NotFound { url, message },
            409 => Self::Conflict { url, message },
            500..=599 => Self::ServerError {
                status,
                url,
                message,
            },
            _ => Self::ApiError {
                status,
                url,
                message,
            },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::ServerError { status, .. } | Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true for errors that mean the caller is not (or no longer) authenticated.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::AuthorizationFailure(_)
                | Self::InsufficientCredentials { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for transport-level failures (DNS, refused connection, timeout).
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
