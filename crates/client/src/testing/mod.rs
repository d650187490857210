//! Testing utilities for Keystone client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use keystone_client::testing::load_fixture;
//!
//! let body = load_fixture("auth/v2_password.json");
//! ```

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A v2 token response expiring `expires` (RFC 3339), with an identity
/// admin endpoint at `admin_url`.
pub fn v2_access_body(token: &str, expires: &str, admin_url: &str) -> serde_json::Value {
    serde_json::json!({
        "access": {
            "token": {
                "id": token,
                "expires": expires,
                "tenant": {"id": "1", "name": "admin"}
            },
            "user": {"id": "1", "name": "admin", "roles": [{"name": "admin"}]},
            "serviceCatalog": [{
                "type": "identity",
                "name": "keystone",
                "endpoints": [{
                    "region": "RegionOne",
                    "publicURL": admin_url,
                    "internalURL": admin_url,
                    "adminURL": admin_url
                }]
            }]
        }
    })
}
