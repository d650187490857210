//! Centralized constants for the Keystone client workspace.
//!
//! Default values used across crates live here so that the client, the
//! configuration loader and the CLI agree on them.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow per request.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = "python-keystoneclient";

// =============================================================================
// Token Lifecycle Defaults
// =============================================================================

/// Default window, in seconds, within which a token counts as stale.
///
/// A token expiring within this window is refreshed before use.
pub const DEFAULT_STALE_DURATION_SECS: u64 = 30;

/// Keyring service namespace for cached authentication responses.
pub const KEYRING_SERVICE: &str = "keystoneclient_auth";

// =============================================================================
// Identity API paths
// =============================================================================

/// Token path appended to a v2 auth URL.
pub const V2_TOKENS_PATH: &str = "/tokens";

/// Token path appended to a v3 auth URL.
pub const V3_TOKENS_PATH: &str = "/auth/tokens";

/// Catalog service type of the identity service.
pub const IDENTITY_SERVICE_TYPE: &str = "identity";
