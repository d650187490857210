//! Data models for identity resources.
//!
//! Types are organized by API version; both versions deserialize ids given as
//! JSON strings or numbers and keep unknown attributes in an `extra` map.

pub mod v2;
pub mod v3;

use secrecy::{ExposeSecret, SecretString};
use serde::Serializer;

/// Serialize an optional secret as its plain value (or `null`).
pub(crate) fn serialize_opt_secret<S>(
    value: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(secret) => serializer.serialize_str(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}
