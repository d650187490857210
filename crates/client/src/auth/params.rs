//! Typed authentication parameters shared by every plugin.
//!
//! Invariants:
//! - Unset fields are `None`; empty strings count as unset.
//! - `tenant_*` accessors are aliases of the `project_*` fields.

use keystone_config::Config;
use secrecy::{ExposeSecret, SecretString};

/// Parameters an [`AuthPlugin`](super::AuthPlugin) authenticates with.
#[derive(Debug, Clone, Default)]
pub struct AuthParameters {
    pub auth_url: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<SecretString>,
    pub token: Option<SecretString>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub project_domain_id: Option<String>,
    pub project_domain_name: Option<String>,
    pub user_domain_id: Option<String>,
    pub user_domain_name: Option<String>,
    pub domain_id: Option<String>,
    pub domain_name: Option<String>,
    /// Pre-resolved service endpoint (token-endpoint authentication).
    pub endpoint: Option<String>,
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn set_secret(value: &Option<SecretString>) -> Option<&str> {
    value
        .as_ref()
        .map(|s| s.expose_secret())
        .filter(|v| !v.is_empty())
}

macro_rules! merge_fields {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $self.$field = $other.$field;
            }
        )+
    };
}

impl AuthParameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `overrides`: every field set there replaces the held value.
    pub fn merge(&mut self, overrides: AuthParameters) {
        merge_fields!(
            self,
            overrides,
            auth_url,
            username,
            user_id,
            password,
            token,
            project_id,
            project_name,
            project_domain_id,
            project_domain_name,
            user_domain_id,
            user_domain_name,
            domain_id,
            domain_name,
            endpoint,
        );
    }

    pub fn auth_url(&self) -> Option<&str> {
        set(&self.auth_url).map(|u| u.trim_end_matches('/'))
    }

    pub fn username(&self) -> Option<&str> {
        set(&self.username)
    }

    pub fn user_id(&self) -> Option<&str> {
        set(&self.user_id)
    }

    pub fn password(&self) -> Option<&str> {
        set_secret(&self.password)
    }

    pub fn token(&self) -> Option<&str> {
        set_secret(&self.token)
    }

    pub fn project_id(&self) -> Option<&str> {
        set(&self.project_id)
    }

    pub fn project_name(&self) -> Option<&str> {
        set(&self.project_name)
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.project_id()
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.project_name()
    }

    pub fn project_domain_id(&self) -> Option<&str> {
        set(&self.project_domain_id)
    }

    pub fn project_domain_name(&self) -> Option<&str> {
        set(&self.project_domain_name)
    }

    pub fn user_domain_id(&self) -> Option<&str> {
        set(&self.user_domain_id)
    }

    pub fn user_domain_name(&self) -> Option<&str> {
        set(&self.user_domain_name)
    }

    pub fn domain_id(&self) -> Option<&str> {
        set(&self.domain_id)
    }

    pub fn domain_name(&self) -> Option<&str> {
        set(&self.domain_name)
    }

    pub fn endpoint(&self) -> Option<&str> {
        set(&self.endpoint).map(|u| u.trim_end_matches('/'))
    }

    /// Fields that identify a cached token, sorted by name.
    pub(crate) fn cache_key_fields(&self) -> [(&'static str, Option<&str>); 12] {
        [
            ("auth_url", self.auth_url()),
            ("domain_id", self.domain_id()),
            ("domain_name", self.domain_name()),
            ("project_domain_id", self.project_domain_id()),
            ("project_domain_name", self.project_domain_name()),
            ("project_id", self.project_id()),
            ("project_name", self.project_name()),
            ("token", self.token()),
            ("user_domain_id", self.user_domain_id()),
            ("user_domain_name", self.user_domain_name()),
            ("user_id", self.user_id()),
            ("username", self.username()),
        ]
    }
}

impl From<&Config> for AuthParameters {
    fn from(config: &Config) -> Self {
        let auth = &config.auth;
        Self {
            auth_url: config.connection.auth_url.clone(),
            username: auth.username.clone(),
            user_id: auth.user_id.clone(),
            password: auth.password.clone(),
            token: auth.token.clone(),
            project_id: auth.project_id.clone(),
            project_name: auth.project_name.clone(),
            project_domain_id: auth.project_domain_id.clone(),
            project_domain_name: auth.project_domain_name.clone(),
            user_domain_id: auth.user_domain_id.clone(),
            user_domain_name: auth.user_domain_name.clone(),
            domain_id: auth.domain_id.clone(),
            domain_name: auth.domain_name.clone(),
            endpoint: config.connection.endpoint.clone(),
        }
    }
}
