//! v2 admin API tests: tenants, users, roles, services, endpoints and tokens.
//!
//! # Invariants
//! - Every request carries the admin token in `X-Auth-Token`
//! - Requests go to the admin identity URL found in the catalog

mod common;

use common::*;
use keystone_client::models::v2::{
    CreateEndpointParams, CreateServiceParams, CreateUserParams, TenantParams, UpdateUserParams,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};

#[tokio::test]
async fn test_list_tenants_with_pagination() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .and(query_param("limit", "3"))
        .and(query_param("marker", "1"))
        .and(header("X-Auth-Token", "aToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v2/tenants.json")))
        .expect(1)
        .mount(&server)
        .await;

    let tenants = client.list_tenants(Some(3), Some("1")).await.unwrap();
    assert_eq!(tenants.len(), 3);
    assert_eq!(tenants[0].id, "3");
    assert_eq!(tenants[0].name, "invisible_to_admin");
    assert_eq!(tenants[2].enabled, Some(true));
}

#[tokio::test]
async fn test_create_tenant_sends_envelope() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tenants"))
        .and(body_json(json!({"tenant": {
            "name": "tenantX", "description": "Like tenant 9, but better.", "enabled": true
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tenant": {
            "id": 4, "name": "tenantX", "description": "Like tenant 9, but better.", "enabled": true
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let tenant = client
        .create_tenant(&TenantParams {
            name: Some("tenantX".into()),
            description: Some("Like tenant 9, but better.".into()),
            enabled: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(tenant.id, "4");
}

#[tokio::test]
async fn test_create_duplicate_tenant_is_conflict() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tenants"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "conflict": {"message": "Conflict occurred attempting to store tenant.", "code": 409}
        })))
        .mount(&server)
        .await;

    let err = client
        .create_tenant(&TenantParams {
            name: Some("admin".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    match err {
        ClientError::Conflict { message, .. } => {
            assert_eq!(message, "Conflict occurred attempting to store tenant.");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_tenant_posts_to_item() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/tenants/4"))
        .and(body_json(json!({"tenant": {"id": "4", "name": "tenantX", "enabled": false}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tenant": {
            "id": "4", "name": "tenantX", "enabled": false
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let tenant = client
        .update_tenant(
            "4",
            &TenantParams {
                name: Some("tenantX".into()),
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(tenant.enabled, Some(false));
}

#[tokio::test]
async fn test_get_missing_tenant_is_not_found() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "itemNotFound": {"message": "Tenant not found", "code": 404}
        })))
        .mount(&server)
        .await;

    let err = client.get_tenant("404").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_tenant_and_find_by_name() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v2/tenants.json")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.0/tenants/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let demo = client.find_tenant_by_name("demo").await.unwrap().unwrap();
    client.delete_tenant(&demo.id).await.unwrap();
    assert!(client.find_tenant_by_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_tenant_role_grants() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("PUT"))
        .and(path("/v2.0/tenants/4/users/foo/roles/OS-KSADM/barrr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"role": {"id": "barrr", "name": "bar"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.0/tenants/4/users/foo/roles/OS-KSADM/barrr"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/tenants/4/users/foo/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": [{"id": "barrr", "name": "bar"}]})))
        .expect(1)
        .mount(&server)
        .await;

    client.add_tenant_user_role("4", "foo", "barrr").await.unwrap();
    let roles = client.list_user_roles("foo", Some("4")).await.unwrap();
    assert_eq!(roles[0].name, "bar");
    client.remove_tenant_user_role("4", "foo", "barrr").await.unwrap();
}

#[tokio::test]
async fn test_list_tenant_users() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants/1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v2/users.json")))
        .expect(1)
        .mount(&server)
        .await;

    let users = client.list_tenant_users("1").await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].tenant_id.as_deref(), Some("1"));
    assert_eq!(users[1].enabled, Some(false));
}

#[tokio::test]
async fn test_create_user_with_null_password() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/users"))
        .and(body_json(json!({"user": {
            "name": "gabriel", "password": null, "email": "test@example.com",
            "tenantId": "1", "enabled": true
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {
            "id": 3, "name": "gabriel", "email": "test@example.com", "tenantId": 1, "enabled": true
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .create_user(&CreateUserParams {
            name: "gabriel".into(),
            password: None,
            email: Some("test@example.com".into()),
            tenant_id: Some("1".into()),
            enabled: true,
        })
        .await
        .unwrap();
    assert_eq!(user.id, "3");
}

#[tokio::test]
async fn test_user_attribute_updates() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;
    let user = || ResponseTemplate::new(200).set_body_json(json!({"user": {"id": "2", "name": "demo"}}));

    Mock::given(method("PUT"))
        .and(path("/v2.0/users/2"))
        .and(body_json(json!({"user": {"id": "2", "name": "gabriel"}})))
        .respond_with(user())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/users/2/OS-KSADM/password"))
        .and(body_json(json!({"user": {"id": "2", "password": "swordfish"}})))
        .respond_with(user())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/users/2/OS-KSADM/tenant"))
        .and(body_json(json!({"user": {"id": "2", "tenantId": "1"}})))
        .respond_with(user())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2.0/users/2/OS-KSADM/enabled"))
        .and(body_json(json!({"user": {"id": "2", "enabled": false}})))
        .respond_with(user())
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_user(
            "2",
            &UpdateUserParams {
                name: Some("gabriel".into()),
                email: None,
            },
        )
        .await
        .unwrap();
    client.update_user_password("2", "swordfish").await.unwrap();
    client.update_user_tenant("2", "1").await.unwrap();
    client.update_user_enabled("2", false).await.unwrap();
}

#[tokio::test]
async fn test_list_users_of_tenant() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tenants/1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v2/users.json")))
        .expect(1)
        .mount(&server)
        .await;

    let users = client.list_users(Some("1"), None, None).await.unwrap();
    assert_eq!(users[0].name.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_roles_live_under_os_ksadm() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/OS-KSADM/roles"))
        .and(body_json(json!({"role": {"name": "sysadmin"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"role": {"id": 3, "name": "sysadmin"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.0/OS-KSADM/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roles": {"values": [
            {"id": 1, "name": "admin"}, {"id": 3, "name": "sysadmin"}
        ]}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.0/OS-KSADM/roles/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let role = client.create_role("sysadmin").await.unwrap();
    assert_eq!(role.id, "3");
    assert_eq!(client.list_roles().await.unwrap().len(), 2);
    client.delete_role(&role.id).await.unwrap();
}

#[tokio::test]
async fn test_services_use_prefixed_envelope() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/OS-KSADM/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("v2/services.json")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/OS-KSADM/services"))
        .and(body_json(json!({"OS-KSADM:service": {
            "name": "swift", "type": "object-store", "description": "Swift-compatible service"
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"OS-KSADM:service": {
            "id": 3, "name": "swift", "type": "object-store", "description": "Swift-compatible service"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let services = client.list_services().await.unwrap();
    assert_eq!(services[1].service_type, "identity");

    let created = client
        .create_service(&CreateServiceParams {
            name: "swift".into(),
            service_type: "object-store".into(),
            description: Some("Swift-compatible service".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "3");
}

#[tokio::test]
async fn test_create_endpoint() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2.0/endpoints"))
        .and(body_json(json!({"endpoint": {
            "region": "RegionOne",
            "service_id": "3",
            "publicurl": "http://swift:8080/v1",
            "adminurl": null,
            "internalurl": null
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endpoint": {
            "id": "e1", "region": "RegionOne", "service_id": "3", "publicurl": "http://swift:8080/v1"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = client
        .create_endpoint(&CreateEndpointParams {
            region: Some("RegionOne".into()),
            service_id: "3".into(),
            publicurl: "http://swift:8080/v1".into(),
            adminurl: None,
            internalurl: None,
        })
        .await
        .unwrap();
    assert_eq!(endpoint.id, "e1");
}

#[tokio::test]
async fn test_validate_and_delete_token() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2.0/tokens/userToken"))
        .and(header("X-Auth-Token", "aToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/v2_password.json")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.0/tokens/userToken"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let access = client.validate_token("userToken").await.unwrap();
    assert_eq!(access.username(), Some("exampleuser"));
    client.delete_token("userToken").await.unwrap();
}

#[tokio::test]
async fn test_catalog_of_current_token() {
    let server = MockServer::start().await;
    let mut client = v2_admin_client(&server).await;

    let catalog = client.catalog().await.unwrap();
    assert_eq!(catalog.services().len(), 1);
    assert_eq!(catalog.services()[0].service_type, "identity");
}

#[tokio::test]
async fn test_catalog_without_token_response_fails() {
    let server = MockServer::start().await;
    let mut client = KeystoneClient::builder()
        .auth_parameters(AuthParameters {
            token: Some(SecretString::new("ADMIN".into())),
            endpoint: Some(v2_url(&server)),
            ..Default::default()
        })
        .build()
        .unwrap();

    let err = client.catalog().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthorizationFailure(_)));
}
