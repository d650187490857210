//! Integration tests for `keystone bootstrap`.

mod common;

use common::keystone_cmd_with_token;
use keystone_client::testing::v2_access_body;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bootstrap_creates_grants_and_verifies() {
    let server = MockServer::start().await;
    let base = format!("{}/v2.0", server.uri());

    Mock::given(method("POST"))
        .and(path("/v2.0/tenants"))
        .and(header("X-Auth-Token", "ADMIN"))
        .and(body_partial_json(json!({"tenant": {"name": "admin", "enabled": true}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant": {"id": "t1", "name": "admin", "enabled": true}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/OS-KSADM/roles"))
        .and(body_partial_json(json!({"role": {"name": "admin"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": {"id": "r1", "name": "admin"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/users"))
        .and(body_partial_json(json!({"user": {
            "name": "root", "password": "s3cret", "tenantId": "t1", "enabled": true
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u1", "name": "root", "enabled": true, "tenantId": "t1"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/tenants/t1/users/u1/roles/OS-KSADM/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": {"id": "r1", "name": "admin"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(body_partial_json(json!({"auth": {
            "passwordCredentials": {"username": "root", "password": "s3cret"},
            "tenantName": "admin"
        }})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(v2_access_body(
                "fresh",
                "2099-01-01T00:00:00Z",
                &base,
            )),
        )
        .expect(1)
        .mount(&server)
        .await;

    keystone_cmd_with_token(&base)
        .args(["bootstrap", "--user-name", "root", "--pass", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Bootstrapped user 'root' with role 'admin' on tenant 'admin'.",
        ));
}

#[tokio::test]
async fn test_bootstrap_fails_when_new_user_cannot_log_in() {
    let server = MockServer::start().await;
    let base = format!("{}/v2.0", server.uri());

    Mock::given(method("POST"))
        .and(path("/v2.0/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant": {"id": "t1", "name": "admin"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/OS-KSADM/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": {"id": "r1", "name": "admin"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u1", "name": "admin"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/tenants/t1/users/u1/roles/OS-KSADM/r1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid user / password", "code": 401}
        })))
        .mount(&server)
        .await;

    keystone_cmd_with_token(&base)
        .args(["bootstrap", "--pass", "s3cret"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid OpenStack Identity credentials."));
}
