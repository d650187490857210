//! Integration tests for `keystone catalog` and `keystone tokens`.

mod common;

use common::keystone_cmd;
use keystone_client::testing::v2_access_body;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_password_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2.0/tokens"))
        .and(body_partial_json(json!({"auth": {
            "passwordCredentials": {"username": "admin", "password": "secret"}
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(v2_access_body(
            "aToken",
            "2099-01-01T00:00:00Z",
            &format!("{}/v2.0", server.uri()),
        )))
        .mount(server)
        .await;
}

fn password_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = keystone_cmd();
    cmd.env("OS_AUTH_URL", format!("{}/v2.0", server.uri()))
        .env("OS_USERNAME", "admin")
        .env("OS_PASSWORD", "secret")
        .env("OS_TENANT_NAME", "admin");
    cmd
}

#[tokio::test]
async fn test_catalog_json_lists_identity_urls() {
    let server = MockServer::start().await;
    mount_password_token(&server).await;

    let output = password_cmd(&server)
        .args(["catalog", "--service", "identity", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["service_type"], "identity");
    assert_eq!(rows[0]["region"], "RegionOne");
    assert_eq!(rows[0]["adminURL"], format!("{}/v2.0", server.uri()));
}

#[tokio::test]
async fn test_catalog_filter_without_match() {
    let server = MockServer::start().await;
    mount_password_token(&server).await;

    password_cmd(&server)
        .args(["catalog", "--service", "compute"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No catalog entries found."));
}

#[tokio::test]
async fn test_token_get_shows_owner() {
    let server = MockServer::start().await;
    mount_password_token(&server).await;

    password_cmd(&server)
        .args(["tokens", "get"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("aToken")
                .and(predicate::str::contains("2099-01-01"))
                .and(predicate::str::contains("tenant_id")),
        );
}
