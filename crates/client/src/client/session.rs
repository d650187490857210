//! Token lifecycle of a [`KeystoneClient`].
//!
//! # What this module handles:
//! - Authenticating through the plugin, the credential cache, or re-scoping an existing token
//! - Handing out the token and management URL for resource calls
//! - Resolving identity properties from explicit parameters or the live token
//!
//! # What this module does NOT handle:
//! - Building token requests (handled by the plugins in [`crate::auth`])
//! - Cache storage formats (handled in [`crate::cache`])
//!
//! # Invariants
//! - All mutation goes through `&mut self`; there is one live [`AccessInfo`] per client.
//! - A user-supplied token is returned verbatim and never refreshed.
//! - Cache writes happen only after a fresh network authentication.

use secrecy::SecretString;
use tracing::debug;

use crate::access::{AccessInfo, Interface};
use crate::auth::AuthParameters;
use crate::client::KeystoneClient;
use crate::error::{ClientError, Result};
use keystone_config::constants::IDENTITY_SERVICE_TYPE;

/// Observable authentication state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token has been obtained (or it was discarded).
    NoCredential,
    Authenticated,
    /// A token is held but expires within the stale window.
    Stale,
}

/// Take the explicit value first, then the one from the token.
fn resolve<'a>(explicit: Option<&'a str>, from_token: Option<&'a str>) -> Option<&'a str> {
    explicit.or(from_token)
}

impl KeystoneClient {
    pub fn session_state(&self) -> SessionState {
        match &self.access {
            None => SessionState::NoCredential,
            Some(access) if access.will_expire_soon(self.stale_duration) => SessionState::Stale,
            Some(_) => SessionState::Authenticated,
        }
    }

    /// The token obtained by the last authentication, if any.
    pub fn access_info(&self) -> Option<&AccessInfo> {
        self.access.as_ref()
    }

    /// Authenticate, merging `overrides` into the plugin parameters first.
    ///
    /// When a still-valid token is held and no token is supplied, that token
    /// is the credential of this request, which allows re-scoping to another
    /// project. The credential cache is consulted unless `force_new_token`.
    pub async fn authenticate(&mut self, overrides: AuthParameters) -> Result<()> {
        self.plugin.params_mut().merge(overrides);
        self.authenticate_with(!self.force_new_token).await
    }

    /// Discard the held token and authenticate again without the cache.
    pub(crate) async fn reauthenticate(&mut self) -> Result<()> {
        self.access = None;
        self.authenticate_with(false).await
    }

    async fn authenticate_with(&mut self, use_cache: bool) -> Result<()> {
        if matches!(self.plugin.token_request(), Ok(None)) {
            debug!(auth_system = self.plugin.auth_system(), "Plugin needs no token request");
            return Ok(());
        }

        let rescope_token = match (self.plugin.params().token(), &self.access) {
            (None, Some(access)) if !access.will_expire_soon(self.stale_duration) => {
                Some(access.auth_token().to_string())
            }
            _ => None,
        };

        let mut params = self.plugin.params().clone();
        if let Some(token) = &rescope_token {
            params.token = Some(SecretString::new(token.clone().into()));
        }

        if use_cache
            && let Some(cache) = &self.cache
            && let Some(access) = cache.load(&params)
        {
            self.access = Some(access);
            return Ok(());
        }

        let obtained = match rescope_token {
            Some(token) => {
                debug!("Re-scoping with the current token");
                let saved = self.plugin.params().token.clone();
                self.plugin.params_mut().token = Some(SecretString::new(token.into()));
                let result = self.plugin.authenticate(&self.transport).await;
                self.plugin.params_mut().token = saved;
                result?
            }
            None => self.plugin.authenticate(&self.transport).await?,
        };

        if let Some(access) = obtained {
            if let Some(cache) = &self.cache {
                cache.store(&params, &access);
            }
            self.access = Some(access);
        }
        Ok(())
    }

    /// Token for the next request, authenticating when none is held or it is stale.
    pub async fn auth_token(&mut self) -> Result<String> {
        if let Some(token) = &self.user_token {
            return Ok(token.clone());
        }

        if self.session_state() != SessionState::Authenticated {
            self.authenticate(AuthParameters::default()).await?;
        }

        match &self.access {
            Some(access) => Ok(access.auth_token().to_string()),
            None => self
                .plugin
                .token_and_endpoint(None, IDENTITY_SERVICE_TYPE, Interface::Admin, None)
                .map(|(token, _)| token),
        }
    }

    /// Use `token` verbatim for every request until [`clear_auth_token`](Self::clear_auth_token).
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.user_token = Some(token.into());
    }

    /// Revert to plugin-managed tokens.
    pub fn clear_auth_token(&mut self) {
        self.user_token = None;
    }

    /// True when the token in use was obtained by the plugin and can be refreshed.
    pub fn is_plugin_managed(&self) -> bool {
        self.user_token.is_none() && self.access.is_some()
    }

    /// URL resource calls are sent to.
    ///
    /// An explicit endpoint wins; otherwise the admin identity URL from the
    /// catalog of the held token, filtered by region.
    pub fn management_url(&self) -> Result<String> {
        if let Some(endpoint) = self.plugin.params().endpoint() {
            return Ok(endpoint.to_string());
        }
        let access = self.access.as_ref().ok_or_else(|| {
            ClientError::AuthorizationFailure("no token held to look up the management URL".into())
        })?;
        access
            .service_catalog()
            .url_for(
                IDENTITY_SERVICE_TYPE,
                Interface::Admin,
                self.region_name.as_deref(),
            )
            .map(|url| url.trim_end_matches('/').to_string())
    }

    /// Token and management URL for a resource call.
    pub(crate) async fn credentials(&mut self) -> Result<(String, String)> {
        let token = self.auth_token().await?;
        Ok((token, self.management_url()?))
    }

    /// Configured auth URL, falling back to the public identity URL in the
    /// catalog of the held token.
    pub fn auth_url(&self) -> Option<&str> {
        resolve(
            self.plugin.params().auth_url(),
            self.access.as_ref().and_then(|access| {
                access
                    .service_catalog()
                    .url_for(
                        IDENTITY_SERVICE_TYPE,
                        Interface::Public,
                        self.region_name.as_deref(),
                    )
                    .ok()
            }),
        )
    }

    pub fn username(&self) -> Option<&str> {
        resolve(
            self.plugin.params().username(),
            self.access.as_ref().and_then(AccessInfo::username),
        )
    }

    pub fn user_id(&self) -> Option<&str> {
        resolve(
            self.plugin.params().user_id(),
            self.access.as_ref().and_then(AccessInfo::user_id),
        )
    }

    pub fn project_id(&self) -> Option<&str> {
        resolve(
            self.plugin.params().project_id(),
            self.access.as_ref().and_then(AccessInfo::project_id),
        )
    }

    pub fn project_name(&self) -> Option<&str> {
        resolve(
            self.plugin.params().project_name(),
            self.access.as_ref().and_then(AccessInfo::project_name),
        )
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.project_id()
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.project_name()
    }

    pub fn domain_id(&self) -> Option<&str> {
        resolve(
            self.plugin.params().domain_id(),
            self.access.as_ref().and_then(AccessInfo::domain_id),
        )
    }

    pub fn domain_name(&self) -> Option<&str> {
        resolve(
            self.plugin.params().domain_name(),
            self.access.as_ref().and_then(AccessInfo::domain_name),
        )
    }

    pub fn user_domain_id(&self) -> Option<&str> {
        resolve(
            self.plugin.params().user_domain_id(),
            self.access.as_ref().and_then(AccessInfo::user_domain_id),
        )
    }

    pub fn user_domain_name(&self) -> Option<&str> {
        resolve(
            self.plugin.params().user_domain_name(),
            self.access.as_ref().and_then(AccessInfo::user_domain_name),
        )
    }

    pub fn project_domain_id(&self) -> Option<&str> {
        resolve(
            self.plugin.params().project_domain_id(),
            self.access.as_ref().and_then(AccessInfo::project_domain_id),
        )
    }

    pub fn project_domain_name(&self) -> Option<&str> {
        resolve(
            self.plugin.params().project_domain_name(),
            self.access.as_ref().and_then(AccessInfo::project_domain_name),
        )
    }
}
