//! Connection and token-cache configuration.
//!
//! Responsibilities:
//! - Define where the identity service lives and how to reach it (TLS, timeout, region).
//! - Define the main `Config` structure combining connection, auth and cache settings.
//!
//! Does NOT handle:
//! - Configuration loading (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Duration fields are serialized as whole seconds.
//! - `auth_url` and `endpoint` are stored without a trailing slash.

use crate::constants::{DEFAULT_STALE_DURATION_SECS, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Identity API protocol version used for authentication and resource calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityApiVersion {
    #[default]
    #[serde(rename = "2.0")]
    V2,
    #[serde(rename = "3")]
    V3,
}

impl FromStr for IdentityApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(['v', 'V']) {
            "2" | "2.0" => Ok(Self::V2),
            "3" | "3.0" => Ok(Self::V3),
            other => Err(format!(
                "unsupported identity API version '{other}' (expected 2.0 or 3)"
            )),
        }
    }
}

impl fmt::Display for IdentityApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("2.0"),
            Self::V3 => f.write_str("3"),
        }
    }
}

/// Connection configuration for the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Identity endpoint used to obtain tokens (e.g. `http://keystone:5000/v2.0`).
    pub auth_url: Option<String>,
    /// Explicit management endpoint; bypasses the service catalog when set.
    pub endpoint: Option<String>,
    /// Region used to select endpoints from the service catalog.
    pub region_name: Option<String>,
    pub identity_api_version: IdentityApiVersion,
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Additional PEM CA bundle to trust.
    pub cacert: Option<PathBuf>,
    /// Client certificate (PEM) for mutual TLS.
    pub cert: Option<PathBuf>,
    /// Private key (PEM) matching `cert`.
    pub key: Option<PathBuf>,
    /// Address of the end user, forwarded when acting as a proxy.
    pub original_ip: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            auth_url: None,
            endpoint: None,
            region_name: None,
            identity_api_version: IdentityApiVersion::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure: false,
            cacert: None,
            cert: None,
            key: None,
            original_ip: None,
        }
    }
}

/// Token cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Persist authentication responses in the OS keyring.
    pub use_keyring: bool,
    /// Always authenticate against the server, ignoring cached tokens.
    pub force_new_token: bool,
    /// Tokens expiring within this window are treated as stale.
    #[serde(with = "duration_seconds")]
    pub stale_duration: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            use_keyring: false,
            force_new_token: false,
            stale_duration: Duration::from_secs(DEFAULT_STALE_DURATION_SECS),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
}
