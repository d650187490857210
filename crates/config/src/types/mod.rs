//! Configuration type definitions for the Keystone client.
//!
//! Responsibilities:
//! - Define connection, authentication and token-cache settings.
//! - Define the identity API version selector.
//!
//! Does NOT handle:
//! - Loading values from the environment or `.env` files (see `loader` module).
//! - Authentication flows or token validation (see client crate).
//!
//! Invariants:
//! - Secrets (`password`, `token`) are `secrecy::SecretString` and never appear in `Debug` output.
//! - Unset parameters stay `None`; defaults are only applied to transport and cache knobs.

mod auth;
mod connection;

pub use auth::AuthConfig;
pub use connection::{CacheConfig, Config, ConnectionConfig, IdentityApiVersion};
