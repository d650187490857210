//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` and `global_test_lock()` to prevent environment pollution.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, for tests that need a clean slate.
pub const OS_VARS: &[&str] = &[
    "OS_AUTH_URL",
    "OS_SERVICE_ENDPOINT",
    "OS_REGION_NAME",
    "OS_ORIGINAL_IP",
    "OS_USERNAME",
    "OS_USER_ID",
    "OS_PASSWORD",
    "OS_SERVICE_TOKEN",
    "OS_TOKEN",
    "OS_PROJECT_ID",
    "OS_TENANT_ID",
    "OS_PROJECT_NAME",
    "OS_TENANT_NAME",
    "OS_PROJECT_DOMAIN_ID",
    "OS_PROJECT_DOMAIN_NAME",
    "OS_USER_DOMAIN_ID",
    "OS_USER_DOMAIN_NAME",
    "OS_DOMAIN_ID",
    "OS_DOMAIN_NAME",
    "OS_IDENTITY_API_VERSION",
    "OS_CACERT",
    "OS_CERT",
    "OS_KEY",
    "OS_INSECURE",
    "OS_CACHE",
    "OS_TIMEOUT",
    "OS_STALE_DURATION",
];

/// Run `f` with every loader variable unset except the given ones.
pub fn with_os_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let mut all: Vec<(&str, Option<&str>)> = OS_VARS.iter().map(|k| (*k, None)).collect();
    for &(key, value) in vars {
        all.retain(|(k, _)| *k != key);
        all.push((key, Some(value)));
    }
    temp_env::with_vars(all, f);
}
