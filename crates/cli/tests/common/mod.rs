//! Shared test utilities for keystone CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point the CLI at a mock identity service.
//!
//! Invariants / Assumptions:
//! - No `OS_*` variable from the host leaks into a test.
//! - Token-endpoint commands authenticate with the token `ADMIN`.

use assert_cmd::Command;

const OS_VARS: &[&str] = &[
    "OS_AUTH_URL",
    "OS_USERNAME",
    "OS_USER_ID",
    "OS_PASSWORD",
    "OS_TENANT_NAME",
    "OS_TENANT_ID",
    "OS_PROJECT_NAME",
    "OS_PROJECT_ID",
    "OS_PROJECT_DOMAIN_ID",
    "OS_PROJECT_DOMAIN_NAME",
    "OS_USER_DOMAIN_ID",
    "OS_USER_DOMAIN_NAME",
    "OS_DOMAIN_ID",
    "OS_DOMAIN_NAME",
    "OS_TOKEN",
    "OS_SERVICE_TOKEN",
    "OS_SERVICE_ENDPOINT",
    "OS_REGION_NAME",
    "OS_IDENTITY_API_VERSION",
    "OS_CACERT",
    "OS_CERT",
    "OS_KEY",
    "OS_CACHE",
    "OS_INSECURE",
    "OS_TIMEOUT",
    "OS_STALE_DURATION",
    "OS_ORIGINAL_IP",
    "RUST_LOG",
];

/// Returns a hermetic `keystone` command for integration testing.
///
/// `DOTENV_DISABLED=1` is set and every `OS_*` variable is cleared, so the
/// command sees only what the test configures.
pub fn keystone_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("keystone");
    cmd.env("DOTENV_DISABLED", "1");
    for var in OS_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Hermetic command authenticating with a pre-issued admin token against `endpoint`.
#[allow(dead_code)]
pub fn keystone_cmd_with_token(endpoint: &str) -> Command {
    let mut cmd = keystone_cmd();
    cmd.env("OS_SERVICE_TOKEN", "ADMIN")
        .env("OS_SERVICE_ENDPOINT", endpoint);
    cmd
}
