//! Configuration management for the Keystone identity client.
//!
//! This crate provides the types and the loader that turn `.env` files,
//! `OS_*` environment variables and explicit overrides into a validated
//! [`Config`].

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, CacheConfig, Config, ConnectionConfig, IdentityApiVersion};
