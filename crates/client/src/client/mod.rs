//! Main Keystone client and API methods.
//!
//! This module provides the primary [`KeystoneClient`]. It owns the
//! authentication plugin and the live token, and hands both to the endpoint
//! functions for every call.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Token lifecycle and identity property resolution
//! - `tenants`, `users`, `roles`, `services`, `tokens`: v2 admin API methods
//! - [`v3`]: v3 API methods behind [`KeystoneClient::v3`]
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Building token requests (delegated to [`crate::auth`])
//!
//! # Invariants
//! - Resource calls that fail with 401 re-authenticate and retry once, but only
//!   when the token is plugin-managed; user-supplied tokens are never refreshed.
//! - The `retry_call!` macro centralizes this retry pattern across all API methods.

pub mod builder;
mod roles;
mod services;
mod session;
mod tenants;
mod tokens;
mod users;
pub mod v3;

pub use session::SessionState;

use std::time::Duration;

use crate::access::AccessInfo;
use crate::auth::AuthPlugin;
use crate::cache::CredentialCache;
use crate::endpoints::HttpTransport;

/// Macro to wrap an async API call with automatic re-authentication on 401.
///
/// When the call fails with `Unauthorized` and the client's token is
/// plugin-managed, the token is discarded, a fresh one is obtained without
/// consulting the cache, and the call is retried once.
///
/// # Usage
///
/// ```ignore
/// retry_call!(self, __token, __base, endpoints::some_endpoint(&self.transport, &__base, &__token, arg).await)
/// ```
///
/// The placeholders `__token` and `__base` are bound to the token and the management URL.
#[macro_export]
macro_rules! retry_call {
    ($client:expr, $token:ident, $base:ident, $call:expr) => {{
        let ($token, $base) = $client.credentials().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::Unauthorized { .. }) if $client.is_plugin_managed() => {
                ::tracing::debug!("Token rejected (status 401), re-authenticating...");
                $client.reauthenticate().await?;
                let ($token, $base) = $client.credentials().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// OpenStack Identity (Keystone) client.
///
/// Authenticates through a pluggable [`AuthPlugin`], optionally caching
/// tokens, and exposes the v2 admin API directly and the v3 API through
/// [`KeystoneClient::v3`].
///
/// # Creating a Client
///
/// ```rust,ignore
/// use keystone_client::KeystoneClient;
/// use keystone_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
/// let mut client = KeystoneClient::builder().from_config(&config).build()?;
/// let tenants = client.list_tenants(None, None).await?;
/// ```
#[derive(Debug)]
pub struct KeystoneClient {
    pub(crate) transport: HttpTransport,
    pub(crate) plugin: Box<dyn AuthPlugin>,
    pub(crate) region_name: Option<String>,
    pub(crate) access: Option<AccessInfo>,
    pub(crate) user_token: Option<String>,
    pub(crate) cache: Option<CredentialCache>,
    pub(crate) force_new_token: bool,
    pub(crate) stale_duration: Duration,
}

impl KeystoneClient {
    /// Create a new client builder.
    pub fn builder() -> builder::KeystoneClientBuilder {
        builder::KeystoneClientBuilder::new()
    }

    /// Registry tag of the authentication plugin in use.
    pub fn auth_system(&self) -> &'static str {
        self.plugin.auth_system()
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    /// Access the v3 API.
    pub fn v3(&mut self) -> v3::IdentityV3<'_> {
        v3::IdentityV3::new(self)
    }
}
