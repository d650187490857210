//! Session lifecycle tests: token caching, re-authentication and re-scoping.
//!
//! # Invariants
//! - A cached token is reused across clients sharing a store
//! - A cached token inside the stale window is ignored and replaced
//! - A 401 on a resource call re-authenticates once, only for plugin-managed tokens

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::*;
use keystone_client::{AccessInfo, CredentialCache, MemoryStore, SessionState};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};

fn tenants_body() -> serde_json::Value {
    json!({"tenants": [{"id": "1", "name": "admin", "enabled": true}]})
}

#[tokio::test]
async fn test_cached_token_is_reused_by_second_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "cached",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());

    let mut first = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .credential_store(Box::new(Arc::clone(&store)))
        .build()
        .unwrap();
    first.authenticate(AuthParameters::default()).await.unwrap();
    assert_eq!(store.len(), 1);

    let mut second = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .credential_store(Box::new(Arc::clone(&store)))
        .build()
        .unwrap();
    second.authenticate(AuthParameters::default()).await.unwrap();

    assert_eq!(second.access_info().unwrap().auth_token(), "cached");
    assert_eq!(second.session_state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_stale_cached_token_triggers_fresh_authentication() {
    let server = MockServer::start().await;
    let window = Duration::from_secs(30);
    let soon = (Utc::now() + chrono::Duration::seconds(10)).to_rfc3339();

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "fresh",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let seeded = CredentialCache::new(Box::new(Arc::clone(&store)), window);
    let stale = AccessInfo::factory(
        &v2_access_body("stale", &soon, &v2_url(&server)),
        &reqwest::header::HeaderMap::new(),
    )
    .unwrap();
    seeded.store(&v2_password_params(&server), &stale);
    assert_eq!(store.len(), 1);

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .credential_store(Box::new(Arc::clone(&store)))
        .stale_duration(window)
        .build()
        .unwrap();
    client.authenticate(AuthParameters::default()).await.unwrap();

    assert_eq!(client.access_info().unwrap().auth_token(), "fresh");
    assert_eq!(client.session_state(), SessionState::Authenticated);

    let cached = seeded.load(&v2_password_params(&server)).unwrap();
    assert_eq!(cached.auth_token(), "fresh");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_force_new_token_skips_cache() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "fresh",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    for _ in 0..2 {
        let mut client = KeystoneClient::builder()
            .auth_parameters(v2_password_params(&server))
            .credential_store(Box::new(Arc::clone(&store)))
            .force_new_token(true)
            .build()
            .unwrap();
        client.authenticate(AuthParameters::default()).await.unwrap();
    }
}

#[tokio::test]
async fn test_different_user_misses_cache() {
    let server = MockServer::start().await;
    mount_v2_token(&server, "tok").await;

    let store = Arc::new(MemoryStore::new());
    let mut alice = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .credential_store(Box::new(Arc::clone(&store)))
        .build()
        .unwrap();
    alice.authenticate(AuthParameters::default()).await.unwrap();

    let mut bob = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            username: Some("bob".into()),
            ..v2_password_params(&server)
        })
        .credential_store(Box::new(Arc::clone(&store)))
        .build()
        .unwrap();
    bob.authenticate(AuthParameters::default()).await.unwrap();

    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_unauthorized_resource_call_reauthenticates_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "first",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "second",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .and(header("X-Auth-Token", "first"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "expired", "code": 401}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .and(header("X-Auth-Token", "second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tenants_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();

    let tenants = client.list_tenants(None, None).await.unwrap();
    assert_eq!(tenants.len(), 1);
    assert_eq!(client.access_info().unwrap().auth_token(), "second");
}

#[tokio::test]
async fn test_persistent_unauthorized_surfaces_after_one_retry() {
    let server = MockServer::start().await;
    mount_v2_token(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();

    let err = client.list_tenants(None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_supplied_token_is_never_refreshed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .and(header("X-Auth-Token", "ADMIN"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            token: Some(SecretString::new("ADMIN".into())),
            endpoint: Some(v2_url(&server)),
            ..Default::default()
        })
        .build()
        .unwrap();

    let err = client.list_tenants(None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_authenticate_with_new_tenant_rescopes_current_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(body_json(json!({"auth": {"token": {"id": "unscoped"}, "tenantId": "t2"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "scoped",
            FAR_FUTURE,
            &v2_url(&server),
        )))
        .expect(1)
        .mount(&server)
        .await;
    mount_v2_token(&server, "unscoped").await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            project_name: None,
            ..v2_password_params(&server)
        })
        .build()
        .unwrap();
    client.authenticate(AuthParameters::default()).await.unwrap();
    assert_eq!(client.access_info().unwrap().auth_token(), "unscoped");

    client
        .authenticate(AuthParameters {
            project_id: Some("t2".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(client.access_info().unwrap().auth_token(), "scoped");
    assert_eq!(client.project_id(), Some("t2"));
}

#[tokio::test]
async fn test_stale_token_is_replaced_before_use() {
    let server = MockServer::start().await;
    let soon = (Utc::now() + chrono::Duration::seconds(10)).to_rfc3339();

    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "stale",
            &soon,
            &v2_url(&server),
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_v2_token(&server, "fresh").await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .and(header("X-Auth-Token", "fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tenants_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .stale_duration(Duration::from_secs(30))
        .build()
        .unwrap();
    client.authenticate(AuthParameters::default()).await.unwrap();
    assert_eq!(client.session_state(), SessionState::Stale);

    client.list_tenants(None, None).await.unwrap();
    assert_eq!(client.session_state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_auth_token_authenticates_lazily() {
    let server = MockServer::start().await;
    mount_v2_token(&server, "lazy").await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(v2_password_params(&server))
        .build()
        .unwrap();
    assert_eq!(client.session_state(), SessionState::NoCredential);

    assert_eq!(client.auth_token().await.unwrap(), "lazy");
    assert_eq!(client.management_url().unwrap(), v2_url(&server));
}
