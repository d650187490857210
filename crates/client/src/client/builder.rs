//! Client builder for constructing [`KeystoneClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Selecting the authentication plugin from the parameters and API version
//! - Configuring the underlying HTTP client (timeouts, TLS roots, client identity)
//!
//! # What this module does NOT handle:
//! - Obtaining tokens (handled in `session.rs`)
//! - Individual API calls (handled by the resource modules)
//!
//! # Invariants
//! - The HTTP client never follows redirects itself; [`HttpTransport`] does.
//! - `insecure` only affects HTTPS connections; HTTP URLs log a warning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::{AuthParameters, PluginRegistry};
use crate::cache::{CredentialCache, CredentialStore, KeyringStore};
use crate::client::KeystoneClient;
use crate::endpoints::HttpTransport;
use crate::error::{ClientError, Result};
use keystone_config::{
    Config, IdentityApiVersion,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_STALE_DURATION_SECS, DEFAULT_TIMEOUT_SECS, USER_AGENT},
};

/// Builder for creating a new [`KeystoneClient`].
///
/// # Example
///
/// ```rust,ignore
/// use keystone_client::{AuthParameters, KeystoneClient};
///
/// let mut client = KeystoneClient::builder()
///     .auth_parameters(AuthParameters {
///         auth_url: Some("http://keystone:5000/v2.0".into()),
///         username: Some("admin".into()),
///         password: Some("secret".into()),
///         project_name: Some("admin".into()),
///         ..Default::default()
///     })
///     .build()?;
/// client.authenticate(Default::default()).await?;
/// ```
pub struct KeystoneClientBuilder {
    params: AuthParameters,
    version: IdentityApiVersion,
    registry: PluginRegistry,
    auth_system: Option<String>,
    region_name: Option<String>,
    timeout: Duration,
    insecure: bool,
    cacert: Option<PathBuf>,
    client_cert: Option<(PathBuf, PathBuf)>,
    original_ip: Option<String>,
    user_agent: String,
    max_redirects: usize,
    store: Option<Box<dyn CredentialStore>>,
    force_new_token: bool,
    stale_duration: Duration,
}

impl Default for KeystoneClientBuilder {
    fn default() -> Self {
        Self {
            params: AuthParameters::default(),
            version: IdentityApiVersion::default(),
            registry: PluginRegistry::new(),
            auth_system: None,
            region_name: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure: false,
            cacert: None,
            client_cert: None,
            original_ip: None,
            user_agent: USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            store: None,
            force_new_token: false,
            stale_duration: Duration::from_secs(DEFAULT_STALE_DURATION_SECS),
        }
    }
}

impl KeystoneClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameters the authentication plugin starts from.
    pub fn auth_parameters(mut self, params: AuthParameters) -> Self {
        self.params = params;
        self
    }

    pub fn identity_api_version(mut self, version: IdentityApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Use `registry` to look up plugins instead of the built-in one.
    pub fn registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Force a plugin tag instead of selecting one from the parameters.
    pub fn auth_system(mut self, tag: impl Into<String>) -> Self {
        self.auth_system = Some(tag.into());
        self
    }

    /// Region used when picking the management URL from the catalog.
    pub fn region_name(mut self, region: impl Into<String>) -> Self {
        self.region_name = Some(region.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against test deployments; it disables server authentication.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Trust the PEM certificates in `path` in addition to the system roots.
    pub fn cacert(mut self, path: PathBuf) -> Self {
        self.cacert = Some(path);
        self
    }

    /// Present the PEM certificate and key as a TLS client identity.
    pub fn client_cert(mut self, cert: PathBuf, key: PathBuf) -> Self {
        self.client_cert = Some((cert, key));
        self
    }

    /// Forward the end user's address to the identity service.
    pub fn original_ip(mut self, ip: impl Into<String>) -> Self {
        self.original_ip = Some(ip.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Cache tokens in the OS keyring.
    pub fn use_keyring(mut self, enabled: bool) -> Self {
        self.store = enabled.then(|| Box::new(KeyringStore::default()) as Box<dyn CredentialStore>);
        self
    }

    /// Cache tokens in `store`.
    pub fn credential_store(mut self, store: Box<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Ignore cached tokens and always authenticate against the service.
    pub fn force_new_token(mut self, force: bool) -> Self {
        self.force_new_token = force;
        self
    }

    /// Window within which a token counts as stale.
    pub fn stale_duration(mut self, window: Duration) -> Self {
        self.stale_duration = window;
        self
    }

    /// Create a client builder from configuration.
    ///
    /// Both the CLI and library callers go through this so the mapping from
    /// configuration to client settings lives in one place.
    pub fn from_config(mut self, config: &Config) -> Self {
        let connection = &config.connection;
        self.params = AuthParameters::from(config);
        self.version = connection.identity_api_version;
        self.region_name = connection.region_name.clone();
        self.timeout = connection.timeout;
        self.insecure = connection.insecure;
        self.cacert = connection.cacert.clone();
        self.client_cert = connection.cert.clone().zip(connection.key.clone());
        self.original_ip = connection.original_ip.clone();
        self = self.use_keyring(config.cache.use_keyring);
        self.force_new_token = config.cache.force_new_token;
        self.stale_duration = config.cache.stale_duration;
        self
    }

    fn build_http(&self) -> Result<reqwest::Client> {
        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none());

        if self.insecure {
            let target = self.params.auth_url().or(self.params.endpoint());
            if target.is_some_and(|url| url.starts_with("http://")) {
                tracing::warn!(
                    "insecure=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }

        if let Some(path) = &self.cacert {
            let pem = read_pem(path)?;
            let certificate = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| ClientError::Tls(format!("invalid CA bundle {}: {e}", path.display())))?;
            http_builder = http_builder.add_root_certificate(certificate);
        }

        if let Some((cert, key)) = &self.client_cert {
            let pem = [read_pem(cert)?, read_pem(key)?].concat();
            let identity = reqwest::Identity::from_pem(&pem)
                .map_err(|e| ClientError::Tls(format!("invalid client certificate: {e}")))?;
            http_builder = http_builder.identity(identity);
        }

        Ok(http_builder.build()?)
    }

    /// Build the [`KeystoneClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidParameters`] for an unknown plugin tag,
    /// [`ClientError::Tls`] when certificate files cannot be used, and
    /// `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<KeystoneClient> {
        let http = self.build_http()?;
        let transport = HttpTransport::new(http)
            .with_user_agent(self.user_agent)
            .with_original_ip(self.original_ip)
            .with_max_redirects(self.max_redirects);

        let plugin = match &self.auth_system {
            Some(tag) => self.registry.create(tag, self.params)?,
            None => self.registry.select(self.params, self.version)?,
        };
        tracing::debug!(auth_system = plugin.auth_system(), "Selected auth plugin");

        Ok(KeystoneClient {
            transport,
            plugin,
            region_name: self.region_name,
            access: None,
            user_token: None,
            cache: self
                .store
                .map(|store| CredentialCache::new(store, self.stale_duration)),
            force_new_token: self.force_new_token,
            stale_duration: self.stale_duration,
        })
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ClientError::Tls(format!("cannot read {}: {e}", path.display())))
}
