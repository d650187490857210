//! v3 API tests through [`keystone_client::IdentityV3`].
//!
//! # Invariants
//! - Updates use `PATCH` with the singular envelope
//! - Grants and group membership are bodiless `PUT`/`DELETE` calls

mod common;

use common::*;
use keystone_client::models::v3::{ProjectParams, UserParams};
use keystone_client::{GrantActor, GrantTarget};
use keystone_config::IdentityApiVersion;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};

fn v3_url(server: &MockServer) -> String {
    format!("{}/v3", server.uri())
}

fn admin_token_client(server: &MockServer) -> KeystoneClient {
    KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            token: Some(SecretString::new("ADMIN".into())),
            endpoint: Some(v3_url(server)),
            ..Default::default()
        })
        .identity_api_version(IdentityApiVersion::V3)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_projects_with_filter() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .and(query_param("domain_id", "default"))
        .and(header("X-Auth-Token", "ADMIN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v3/projects.json")))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client
        .v3()
        .list_projects(&[("domain_id", Some("default")), ("name", None)])
        .await
        .unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].enabled, Some(false));
    assert!(projects[0].extra.contains_key("links"));
}

#[tokio::test]
async fn test_create_and_patch_project() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("POST"))
        .and(path("/v3/projects"))
        .and(body_json(json!({"project": {"name": "p3", "domain_id": "default"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"project": {
            "id": "p3", "name": "p3", "domain_id": "default", "enabled": true
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v3/projects/p3"))
        .and(body_json(json!({"project": {"enabled": false}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"project": {
            "id": "p3", "name": "p3", "enabled": false
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let mut v3 = client.v3();
    let project = v3
        .create_project(&ProjectParams {
            name: Some("p3".into()),
            domain_id: Some("default".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let updated = v3
        .update_project(
            &project.id,
            &ProjectParams {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.enabled, Some(false));
}

#[tokio::test]
async fn test_create_user_sends_password() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("POST"))
        .and(path("/v3/users"))
        .and(body_json(json!({"user": {"name": "u1", "domain_id": "default", "password": "pw"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"user": {
            "id": "u1", "name": "u1", "domain_id": "default"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .v3()
        .create_user(&UserParams {
            name: Some("u1".into()),
            domain_id: Some("default".into()),
            password: Some(SecretString::new("pw".into())),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn test_role_grants_on_project_and_domain() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("PUT"))
        .and(path("/v3/projects/p1/users/u1/roles/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/domains/d1/groups/g1/roles/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut v3 = client.v3();
    v3.grant_role(GrantTarget::Project("p1"), GrantActor::User("u1"), "r1")
        .await
        .unwrap();
    v3.revoke_role(GrantTarget::Domain("d1"), GrantActor::Group("g1"), "r1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_group_membership() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("PUT"))
        .and(path("/v3/groups/g1/users/u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/groups/g1/users/u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut v3 = client.v3();
    v3.add_user_to_group("g1", "u1").await.unwrap();
    v3.remove_user_from_group("g1", "u1").await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_domain_is_not_found() {
    let server = MockServer::start().await;
    let mut client = admin_token_client(&server);

    Mock::given(method("DELETE"))
        .and(path("/v3/domains/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Could not find domain: nope", "code": 404, "title": "Not Found"}
        })))
        .mount(&server)
        .await;

    match client.v3().delete_domain("nope").await {
        Err(ClientError::NotFound { message, .. }) => {
            assert_eq!(message, "Could not find domain: nope");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_v3_password_flow_uses_catalog_admin_url() {
    let server = MockServer::start().await;
    let mut body = load_fixture("auth/v3_token.json");
    body["token"]["catalog"][0]["endpoints"][1]["url"] = json!(v3_url(&server));

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .and(body_json(json!({"auth": {
            "identity": {"methods": ["password"], "password": {"user": {
                "name": "exampleuser", "domain": {"id": "default"}, "password": "pw"
            }}},
            "scope": {"project": {"id": "pid"}}
        }})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", "v3-token")
                .set_body_json(body),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/roles"))
        .and(header("X-Auth-Token", "v3-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": [
            {"id": "r1", "name": "admin"}
        ], "links": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            auth_url: Some(v3_url(&server)),
            username: Some("exampleuser".into()),
            user_domain_id: Some("default".into()),
            password: Some(SecretString::new("pw".into())),
            project_id: Some("pid".into()),
            ..Default::default()
        })
        .identity_api_version(IdentityApiVersion::V3)
        .region_name("RegionOne")
        .build()
        .unwrap();

    let roles = client.v3().list_roles(&[]).await.unwrap();
    assert_eq!(roles[0].name, "admin");
    assert_eq!(client.user_domain_id(), Some("default"));
}
