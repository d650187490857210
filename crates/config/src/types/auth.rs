//! Authentication parameters as read from configuration.
//!
//! Responsibilities:
//! - Hold the user, project and domain identifiers plus secrets used to authenticate.
//!
//! Does NOT handle:
//! - Deciding whether the parameters are sufficient (see the client's auth plugins).
//!
//! Invariants:
//! - `project_*` fields also carry the v2 `tenant_*` values.

use secrecy::SecretString;

/// Authentication configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<SecretString>,
    /// Pre-issued token; used for token authentication or with a service endpoint.
    pub token: Option<SecretString>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub project_domain_id: Option<String>,
    pub project_domain_name: Option<String>,
    pub user_domain_id: Option<String>,
    pub user_domain_name: Option<String>,
    pub domain_id: Option<String>,
    pub domain_name: Option<String>,
}

impl AuthConfig {
    /// Returns true when a username/user id and password pair is present.
    pub fn has_password_credentials(&self) -> bool {
        (self.username.is_some() || self.user_id.is_some()) && self.password.is_some()
    }
}
