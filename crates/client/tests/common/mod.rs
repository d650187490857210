//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Token responses built here never expire during a test run
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

#[allow(unused_imports)]
pub use keystone_client::testing::{load_fixture, v2_access_body};

#[allow(unused_imports)]
pub use keystone_client::{AuthParameters, ClientError, KeystoneClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;

/// Expiry used for tokens that must stay valid.
#[allow(dead_code)]
pub const FAR_FUTURE: &str = "2099-01-01T00:00:00Z";

/// `{server}/v2.0`.
#[allow(dead_code)]
pub fn v2_url(server: &MockServer) -> String {
    format!("{}/v2.0", server.uri())
}

/// Password parameters for the v2 API of `server`.
#[allow(dead_code)]
pub fn v2_password_params(server: &MockServer) -> AuthParameters {
    AuthParameters {
        auth_url: Some(v2_url(server)),
        username: Some("admin".into()),
        password: Some(SecretString::new("secret".into())),
        project_name: Some("admin".into()),
        ..Default::default()
    }
}

/// Mount a v2 token endpoint answering with `token`, whose catalog points back at `server`.
#[allow(dead_code)]
pub async fn mount_v2_token(server: &MockServer, token: &str) {
    Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/v2.0/tokens"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(v2_access_body(
                token,
                FAR_FUTURE,
                &v2_url(server),
            )),
        )
        .mount(server)
        .await;
}

/// Client authenticated as admin against the v2 API of `server`.
#[allow(dead_code)]
pub async fn v2_admin_client(server: &MockServer) -> KeystoneClient {
    mount_v2_token(server, "aToken").await;
    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(server))
        .build()
        .unwrap();
    client.authenticate(AuthParameters::default()).await.unwrap();
    client
}
