//! Credential cache bridge.
//!
//! Responsibilities:
//! - Derive a deterministic cache key from authentication parameters.
//! - Serve a cached [`AccessInfo`] unless it is inside the staleness window.
//! - Store freshly obtained tokens as tagged JSON records.
//!
//! Does NOT handle:
//! - Deciding when to consult the cache (see `client::session`).
//!
//! Invariants:
//! - Cache failures never fail authentication; they are logged and treated as a miss.
//! - Entries are `{"format":1,"access":{...}}`; any other format is a miss.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::access::AccessInfo;
use crate::auth::AuthParameters;
use keystone_config::constants::KEYRING_SERVICE;

const RECORD_FORMAT: u32 = 1;
const MISSING: &str = "?";

/// Failure of a credential store backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// A secure byte store addressed by string keys.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }
}

/// Store backed by the operating system keyring.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE)
    }
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, CacheError> {
        Ok(keyring::Entry::new(&self.service, key)?)
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self.entry(key)?.get_secret() {
            Ok(bytes) => Ok(Some(bytes)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entry(key)?.set_secret(value)?;
        Ok(())
    }
}

/// Process-local store, mainly for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Record {
    format: u32,
    access: AccessInfo,
}

/// Reads and writes [`AccessInfo`] records through a [`CredentialStore`].
#[derive(Debug)]
pub struct CredentialCache {
    store: Box<dyn CredentialStore>,
    stale_duration: Duration,
}

impl CredentialCache {
    pub fn new(store: Box<dyn CredentialStore>, stale_duration: Duration) -> Self {
        Self {
            store,
            stale_duration,
        }
    }

    /// Cache backed by the OS keyring under the `keystoneclient_auth` service.
    pub fn keyring(stale_duration: Duration) -> Self {
        Self::new(Box::new(KeyringStore::default()), stale_duration)
    }

    pub fn stale_duration(&self) -> Duration {
        self.stale_duration
    }

    /// Key identifying the token obtained with `params`.
    ///
    /// Values are joined with `/` in field-name order; unset fields become `?`.
    pub fn build_key(params: &AuthParameters) -> String {
        params
            .cache_key_fields()
            .iter()
            .map(|(_, value)| value.unwrap_or(MISSING))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Cached token for `params`, or `None` on miss, staleness or any failure.
    pub fn load(&self, params: &AuthParameters) -> Option<AccessInfo> {
        let key = Self::build_key(params);
        let bytes = match self.store.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read credential cache");
                return None;
            }
        };

        let record: Record = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Discarding undecodable credential cache entry");
                return None;
            }
        };
        if record.format != RECORD_FORMAT {
            warn!(
                format = record.format,
                "Discarding credential cache entry with unknown format"
            );
            return None;
        }

        if record.access.will_expire_soon(self.stale_duration) {
            debug!("Cached token is stale, ignoring it");
            return None;
        }

        debug!("Using cached token");
        Some(record.access)
    }

    /// Persist `access` under the key for `params`. Failures are logged.
    pub fn store(&self, params: &AuthParameters, access: &AccessInfo) {
        let record = Record {
            format: RECORD_FORMAT,
            access: access.clone(),
        };
        let bytes = match serde_json::to_vec(&record) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode credential cache entry");
                return;
            }
        };
        if let Err(e) = self.store.set(&Self::build_key(params), &bytes) {
            warn!(error = %e, "Failed to write credential cache");
        }
    }
}
