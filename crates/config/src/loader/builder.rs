//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges explicit values and the environment.
//! - Validate and normalize URLs, timeouts and TLS file pairs.
//! - Build the final `Config`.
//!
//! Does NOT handle:
//! - Parsing individual environment variables (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - A configuration is only valid with an auth URL or a token/endpoint pair.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_STALE_DURATION_SECS, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::types::{AuthConfig, CacheConfig, Config, ConnectionConfig, IdentityApiVersion};

/// Values collected so far; every field stays `None` until some layer sets it.
#[derive(Debug, Default)]
pub(crate) struct LoaderFields {
    pub auth_url: Option<String>,
    pub endpoint: Option<String>,
    pub region_name: Option<String>,
    pub identity_api_version: Option<IdentityApiVersion>,
    pub timeout: Option<Duration>,
    pub insecure: Option<bool>,
    pub cacert: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub original_ip: Option<String>,
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
    pub use_keyring: Option<bool>,
    pub force_new_token: Option<bool>,
    pub stale_duration: Option<Duration>,
}

/// Configuration loader that builds config from explicit values and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    fields: LoaderFields,
}

macro_rules! string_setter {
    ($(#[$doc:meta])* $name:ident => $field:ident) => {
        $(#[$doc])*
        pub fn $name(mut self, value: impl Into<String>) -> Self {
            self.fields.$field = Some(value.into());
            self
        }
    };
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Skipped when `DOTENV_DISABLED` is `true` or `1`. A missing file is not an error.
    ///
    /// SAFETY: Error messages never include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                Ok(self)
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Read configuration from `OS_*` environment variables.
    ///
    /// Values set through builder methods before this call are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    string_setter!(
        /// Set the identity endpoint used to obtain tokens.
        with_auth_url => auth_url
    );
    string_setter!(
        /// Set an explicit management endpoint.
        with_endpoint => endpoint
    );
    string_setter!(with_region_name => region_name);
    string_setter!(with_original_ip => original_ip);
    string_setter!(with_username => username);
    string_setter!(with_user_id => user_id);
    string_setter!(
        /// Set the project (v2: tenant) id.
        with_project_id => project_id
    );
    string_setter!(
        /// Set the project (v2: tenant) name.
        with_project_name => project_name
    );
    string_setter!(with_project_domain_id => project_domain_id);
    string_setter!(with_project_domain_name => project_domain_name);
    string_setter!(with_user_domain_id => user_domain_id);
    string_setter!(with_user_domain_name => user_domain_name);
    string_setter!(with_domain_id => domain_id);
    string_setter!(with_domain_name => domain_name);

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.fields.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set a pre-issued token.
    pub fn with_token(mut self, token: String) -> Self {
        self.fields.token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_identity_api_version(mut self, version: IdentityApiVersion) -> Self {
        self.fields.identity_api_version = Some(version);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fields.timeout = Some(timeout);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.fields.insecure = Some(insecure);
        self
    }

    pub fn with_cacert(mut self, path: PathBuf) -> Self {
        self.fields.cacert = Some(path);
        self
    }

    pub fn with_cert(mut self, path: PathBuf) -> Self {
        self.fields.cert = Some(path);
        self
    }

    pub fn with_key(mut self, path: PathBuf) -> Self {
        self.fields.key = Some(path);
        self
    }

    /// Enable or disable the keyring token cache.
    pub fn with_use_keyring(mut self, enabled: bool) -> Self {
        self.fields.use_keyring = Some(enabled);
        self
    }

    pub fn with_force_new_token(mut self, force: bool) -> Self {
        self.fields.force_new_token = Some(force);
        self
    }

    /// Set the window within which a token is considered stale.
    pub fn with_stale_duration(mut self, window: Duration) -> Self {
        self.fields.stale_duration = Some(window);
        self
    }

    pub(crate) fn fields_mut(&mut self) -> &mut LoaderFields {
        &mut self.fields
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let f = self.fields;

        let auth_url = f
            .auth_url
            .as_deref()
            .map(|raw| validate_and_normalize_url("auth_url", raw))
            .transpose()?;
        let endpoint = f
            .endpoint
            .as_deref()
            .map(|raw| validate_and_normalize_url("endpoint", raw))
            .transpose()?;

        if auth_url.is_none() && (endpoint.is_none() || f.token.is_none()) {
            return Err(ConfigError::MissingAuthSource);
        }

        match (&f.cert, &f.key) {
            (Some(_), None) => return Err(ConfigError::IncompleteClientCert { missing: "key" }),
            (None, Some(_)) => return Err(ConfigError::IncompleteClientCert { missing: "cert" }),
            _ => {}
        }

        let timeout = f
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        let connection = ConnectionConfig {
            auth_url,
            endpoint,
            region_name: f.region_name,
            identity_api_version: f.identity_api_version.unwrap_or_default(),
            timeout,
            insecure: f.insecure.unwrap_or(false),
            cacert: f.cacert,
            cert: f.cert,
            key: f.key,
            original_ip: f.original_ip,
        };

        let auth = AuthConfig {
            username: f.username,
            user_id: f.user_id,
            password: f.password,
            token: f.token,
            project_id: f.project_id,
            project_name: f.project_name,
            project_domain_id: f.project_domain_id,
            project_domain_name: f.project_domain_name,
            user_domain_id: f.user_domain_id,
            user_domain_name: f.user_domain_name,
            domain_id: f.domain_id,
            domain_name: f.domain_name,
        };

        let cache = CacheConfig {
            use_keyring: f.use_keyring.unwrap_or(false),
            force_new_token: f.force_new_token.unwrap_or(false),
            stale_duration: f
                .stale_duration
                .unwrap_or(Duration::from_secs(DEFAULT_STALE_DURATION_SECS)),
        };

        Ok(Config {
            connection,
            auth,
            cache,
        })
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

/// Validate an http(s) URL with a host and strip any trailing slash.
fn validate_and_normalize_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: var.into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://keystone:5000/v2.0): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
