//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` variants to exit codes and user-facing messages.
//!
//! Does NOT handle:
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use keystone_client::ClientError;

/// Structured exit codes for `keystone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid or insufficient credentials.
    ///
    /// Scripts should refresh credentials rather than retry.
    AuthenticationFailed = 2,

    /// Network, timeout, DNS or TLS failure. Scripts may retry.
    ConnectionError = 3,

    NotFound = 4,

    /// Bad parameters or an unusable response.
    ValidationError = 5,

    PermissionDenied = 6,

    /// The resource already exists (HTTP 409).
    Conflict = 7,

    /// HTTP 5xx from the identity service.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Unauthorized { .. }
            | ClientError::AuthorizationFailure(_)
            | ClientError::InsufficientCredentials { .. } => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_)
            | ClientError::Tls(_)
            | ClientError::TooManyRedirects { .. } => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }

            ClientError::NotFound { .. } | ClientError::EndpointNotFound(_) => ExitCode::NotFound,

            ClientError::BadRequest { .. }
            | ClientError::InvalidParameters(_)
            | ClientError::MalformedResponse(_) => ExitCode::ValidationError,

            ClientError::Forbidden { .. } => ExitCode::PermissionDenied,
            ClientError::Conflict { .. } => ExitCode::Conflict,
            ClientError::ServerError { .. } => ExitCode::ServiceUnavailable,

            ClientError::ApiError { .. } | ClientError::HttpError(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for `anyhow::Error` to extract exit codes and messages.
pub trait ExitCodeExt {
    /// Returns `ExitCode::GeneralError` if no `ClientError` is in the chain.
    fn exit_code(&self) -> ExitCode;

    /// Message printed on stderr before exiting.
    fn user_message(&self) -> String;
}

fn find_client_error(err: &anyhow::Error) -> Option<&ClientError> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        find_client_error(self)
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }

    fn user_message(&self) -> String {
        match find_client_error(self) {
            Some(ClientError::Unauthorized { .. }) => {
                "Invalid OpenStack Identity credentials.".to_string()
            }
            Some(ClientError::AuthorizationFailure(_)) => "Unable to authorize user".to_string(),
            _ => format!("{self:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn unauthorized() -> ClientError {
        ClientError::Unauthorized {
            url: "http://h/v2.0/tokens".into(),
            message: "bad".into(),
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Conflict.as_i32(), 7);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_client_error_mapping() {
        assert_eq!(ExitCode::from(&unauthorized()), ExitCode::AuthenticationFailed);
        assert_eq!(
            ExitCode::from(&ClientError::InsufficientCredentials {
                missing: vec!["password"]
            }),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::from_status(409, "u".into(), "m".into())),
            ExitCode::Conflict
        );
        assert_eq!(
            ExitCode::from(&ClientError::from_status(503, "u".into(), "m".into())),
            ExitCode::ServiceUnavailable
        );
        assert_eq!(
            ExitCode::from(&ClientError::from_status(418, "u".into(), "m".into())),
            ExitCode::GeneralError
        );
        assert_eq!(
            ExitCode::from(&ClientError::EndpointNotFound("identity".into())),
            ExitCode::NotFound
        );
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = anyhow::Error::new(unauthorized()).context("listing tenants");
        assert_eq!(err.exit_code(), ExitCode::AuthenticationFailed);
        assert_eq!(err.user_message(), "Invalid OpenStack Identity credentials.");
    }

    #[test]
    fn test_authorization_failure_message() {
        let result: Result<(), ClientError> =
            Err(ClientError::AuthorizationFailure("no catalog".into()));
        let err = result.context("catalog").unwrap_err();
        assert_eq!(err.user_message(), "Unable to authorize user");
    }

    #[test]
    fn test_other_errors_print_chain() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
        assert_eq!(err.user_message(), "boom");
    }
}
