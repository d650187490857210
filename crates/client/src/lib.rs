//! OpenStack Identity (Keystone) client.
//!
//! This crate authenticates against the v2.0 and v3 identity APIs through
//! pluggable authentication plugins, optionally caches tokens in a secure
//! store, and wraps the admin API for tenants/projects, users, roles,
//! services and endpoints.

pub mod access;
pub mod auth;
pub mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod serde_helpers;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::{AccessInfo, CatalogService, EndpointSet, Interface, ServiceCatalog};
pub use auth::{
    AuthParameters, AuthPlugin, PASSWORD_V2, PASSWORD_V3, PasswordV2Plugin, PasswordV3Plugin,
    PluginConstructor, PluginRegistry, TOKEN_ENDPOINT, TokenEndpointPlugin, TokenRequest,
};
pub use cache::{CacheError, CredentialCache, CredentialStore, KeyringStore, MemoryStore};
pub use client::builder::KeystoneClientBuilder;
pub use client::v3::IdentityV3;
pub use client::{KeystoneClient, SessionState};
pub use endpoints::v3::{GrantActor, GrantTarget};
pub use error::{ClientError, Result};
