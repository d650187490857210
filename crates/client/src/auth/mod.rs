//! Authentication plugins.
//!
//! Responsibilities:
//! - Define the [`AuthPlugin`] capability: validate parameters, describe the
//!   token request, and turn the response into an [`AccessInfo`].
//! - Provide the password/token plugins for both protocol versions and the
//!   token-endpoint plugin.
//! - Map plugin tags to constructors through [`PluginRegistry`].
//!
//! Does NOT handle:
//! - Deciding when to re-authenticate (see `client::session`).
//! - Persisting tokens (see `cache`).
//!
//! Invariants:
//! - `authenticate` issues at most one logical POST; redirects are part of that call.
//! - `sufficient_options` reports every missing field at once.

mod params;
mod password_v2;
mod password_v3;
mod registry;
mod token_endpoint;

pub use params::AuthParameters;
pub use password_v2::PasswordV2Plugin;
pub use password_v3::PasswordV3Plugin;
pub use registry::{PASSWORD_V2, PASSWORD_V3, PluginConstructor, PluginRegistry, TOKEN_ENDPOINT};
pub use token_endpoint::TokenEndpointPlugin;

use futures::future::BoxFuture;
use std::fmt;

use crate::access::{AccessInfo, Interface};
use crate::endpoints::{self, HttpTransport};
use crate::error::{ClientError, Result};

/// A fully described token request.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    /// Absolute URL the request is POSTed to.
    pub url: String,
    pub body: serde_json::Value,
    /// Token sent as `X-Auth-Token` alongside the body, if any.
    pub auth_token: Option<String>,
}

/// An authentication mechanism.
pub trait AuthPlugin: Send + Sync + fmt::Debug {
    /// Registry tag of this plugin.
    fn auth_system(&self) -> &'static str;

    fn params(&self) -> &AuthParameters;

    fn params_mut(&mut self) -> &mut AuthParameters;

    /// Fails with `InsufficientCredentials` naming every missing field.
    fn sufficient_options(&self) -> Result<()>;

    /// The request to send, or `None` when the plugin needs no network call.
    fn token_request(&self) -> Result<Option<TokenRequest>>;

    /// Validate, send the token request and parse the response.
    ///
    /// Returns `Ok(None)` for plugins that do not talk to the identity service.
    fn authenticate<'a>(
        &'a self,
        transport: &'a HttpTransport,
    ) -> BoxFuture<'a, Result<Option<AccessInfo>>> {
        Box::pin(async move {
            self.sufficient_options()?;
            match self.token_request()? {
                Some(request) => endpoints::request_token(transport, &request).await.map(Some),
                None => Ok(None),
            }
        })
    }

    /// Token and service endpoint to use for requests.
    fn token_and_endpoint(
        &self,
        access: Option<&AccessInfo>,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
    ) -> Result<(String, String)> {
        let access = access.ok_or_else(|| {
            ClientError::AuthorizationFailure("not authenticated".to_string())
        })?;
        let url = access
            .service_catalog()
            .url_for(service_type, interface, region)?;
        Ok((access.auth_token().to_string(), url.to_string()))
    }
}

/// Collect `names` whose value is unset.
pub(crate) fn unset<'a>(fields: &[(&'static str, Option<&'a str>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect()
}
