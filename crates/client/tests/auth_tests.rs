//! Token request tests against a mock identity service.
//!
//! # Invariants
//! - v2 requests POST `{auth_url}/tokens`; v3 requests POST `{auth_url}/auth/tokens`
//! - Redirects replay the same method and body

mod common;

use common::*;
use keystone_client::{Interface, PASSWORD_V3};
use keystone_config::IdentityApiVersion;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_v2_password_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(header("User-Agent", "python-keystoneclient"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"auth": {
            "passwordCredentials": {"username": "exampleuser", "password": "password"},
            "tenantName": "exampleproject"
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/v2_password.json")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some(format!("{}/v2.0/", server.uri())),
            username: Some("exampleuser".into()),
            password: Some(SecretString::new("password".into())),
            project_name: Some("exampleproject".into()),
            ..Default::default()
        })
        .build()
        .unwrap();

    client.authenticate(AuthParameters::default()).await.unwrap();

    let access = client.access_info().unwrap();
    assert_eq!(access.auth_token(), "3e2813b7ba0b4006840c3825860b86ed");
    assert_eq!(access.username(), Some("exampleuser"));
    assert_eq!(client.tenant_id(), Some("225da22d3ce34b15877ea70b2a575f58"));
    assert_eq!(
        client.management_url().unwrap(),
        "http://identity.north.host:35357/v2.0"
    );
    assert_eq!(
        access
            .service_catalog()
            .url_for("compute", Interface::Public, Some("RegionOne"))
            .unwrap(),
        "https://compute.north.host/v1/1234"
    );
}

#[tokio::test]
async fn test_v3_token_scoped_to_project() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .and(header("X-Auth-Token", "abc"))
        .and(body_json(json!({"auth": {
            "identity": {"methods": ["token"], "token": {"id": "abc"}},
            "scope": {"project": {"id": "pid"}}
        }})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", "new-token")
                .set_body_json(load_fixture("auth/v3_token.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some(format!("{}/v3", server.uri())),
            token: Some(SecretString::new("abc".into())),
            project_id: Some("pid".into()),
            ..Default::default()
        })
        .identity_api_version(IdentityApiVersion::V3)
        .build()
        .unwrap();
    assert_eq!(client.auth_system(), PASSWORD_V3);

    client.authenticate(AuthParameters::default()).await.unwrap();

    let access = client.access_info().unwrap();
    assert_eq!(access.auth_token(), "new-token");
    assert_eq!(access.project_id(), Some("pid"));
    assert_eq!(access.project_domain_id(), Some("default"));
    assert!(access.project_scoped());
}

#[tokio::test]
async fn test_v3_missing_subject_token_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(ResponseTemplate::new(201).set_body_json(load_fixture("auth/v3_token.json")))
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some(format!("{}/v3", server.uri())),
            token: Some(SecretString::new("abc".into())),
            ..Default::default()
        })
        .identity_api_version(IdentityApiVersion::V3)
        .build()
        .unwrap();

    let err = client.authenticate(AuthParameters::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_redirect_305_replays_request() {
    let server = MockServer::start().await;
    let body = json!({"auth": {
        "passwordCredentials": {"username": "admin", "password": "secret"},
        "tenantName": "admin"
    }});

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(body_json(body.clone()))
        .respond_with(
            ResponseTemplate::new(305)
                .insert_header("Location", format!("{}/moved/v2.0/tokens", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/moved/v2.0/tokens"))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "redirected",
            FAR_FUTURE,
            "http://admin:35357/v2.0",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();
    client.authenticate(AuthParameters::default()).await.unwrap();

    assert_eq!(client.access_info().unwrap().auth_token(), "redirected");
}

#[tokio::test]
async fn test_redirect_loop_is_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/v2.0/tokens", server.uri())),
        )
        .expect(3)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .max_redirects(2)
        .build()
        .unwrap();

    let err = client.authenticate(AuthParameters::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::TooManyRedirects { limit: 2, .. }));
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "The request you have made requires authentication.", "code": 401}
        })))
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();

    match client.authenticate(AuthParameters::default()).await {
        Err(ClientError::Unauthorized { message, .. }) => {
            assert_eq!(message, "The request you have made requires authentication.");
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert!(client.access_info().is_none());
}

#[tokio::test]
async fn test_non_json_success_is_authorization_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();

    let err = client.authenticate(AuthParameters::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::AuthorizationFailure(_)));
}

#[tokio::test]
async fn test_insufficient_credentials_send_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some(v2_url(&server)),
            username: Some("admin".into()),
            ..Default::default()
        })
        .build()
        .unwrap();

    match client.authenticate(AuthParameters::default()).await {
        Err(ClientError::InsufficientCredentials { missing }) => {
            assert_eq!(missing, vec!["password", "token"]);
        }
        other => panic!("expected InsufficientCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn test_original_ip_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(header("Forwarded", "for=10.0.0.7;by=python-keystoneclient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "tok",
            FAR_FUTURE,
            "http://admin:35357/v2.0",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .original_ip("10.0.0.7")
        .build()
        .unwrap();

    client.authenticate(AuthParameters::default()).await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some("http://127.0.0.1:1/v2.0".into()),
            username: Some("admin".into()),
            password: Some(SecretString::new("secret".into())),
            ..Default::default()
        })
        .build()
        .unwrap();

    let err = client.authenticate(AuthParameters::default()).await.unwrap_err();
    assert!(err.is_connection_error(), "unexpected error: {err:?}");
}
