//! Identity v2 admin endpoints.
//!
//! Plain CRUD goes through [`resource`](super::resource); this module holds the
//! collection descriptors and the calls that do not fit that mold.

use reqwest::Method;
use serde_json::json;

use super::encode_path_segment;
use super::request::HttpTransport;
use super::resource::{self, Collection};
use crate::error::{ClientError, Result};
use crate::models::v2::{Role, Tenant, TenantParams, UpdateUserParams, User};

pub const TENANTS: Collection = Collection::new("/tenants", "tenant", "tenants");
pub const USERS: Collection = Collection::new("/users", "user", "users");
pub const ROLES: Collection = Collection::new("/OS-KSADM/roles", "role", "roles");
pub const SERVICES: Collection =
    Collection::new("/OS-KSADM/services", "OS-KSADM:service", "OS-KSADM:services");
pub const ENDPOINTS: Collection = Collection::new("/endpoints", "endpoint", "endpoints");

fn user_role_url(base_url: &str, tenant_id: &str, user_id: &str, role_id: &str) -> String {
    format!(
        "{base_url}/tenants/{}/users/{}/roles/OS-KSADM/{}",
        encode_path_segment(tenant_id),
        encode_path_segment(user_id),
        encode_path_segment(role_id)
    )
}

/// Grant `role_id` to `user_id` on `tenant_id`.
pub async fn add_user_role(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    tenant_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<()> {
    let url = user_role_url(base_url, tenant_id, user_id, role_id);
    resource::put_at(transport, &url, auth_token).await
}

pub async fn remove_user_role(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    tenant_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<()> {
    let url = user_role_url(base_url, tenant_id, user_id, role_id);
    resource::delete_at(transport, &url, auth_token).await
}

/// Users holding any role on `tenant_id`.
pub async fn list_tenant_users(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    tenant_id: &str,
) -> Result<Vec<User>> {
    let url = format!("{}/users", TENANTS.item_url(base_url, tenant_id));
    resource::list_at(transport, &url, auth_token, USERS.plural, &[]).await
}

/// Roles of `user_id`, on `tenant_id` when given, otherwise global roles.
pub async fn list_user_roles(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    tenant_id: Option<&str>,
) -> Result<Vec<Role>> {
    let url = match tenant_id {
        Some(tenant_id) => format!(
            "{}/users/{}/roles",
            TENANTS.item_url(base_url, tenant_id),
            encode_path_segment(user_id)
        ),
        None => format!("{}/roles", USERS.item_url(base_url, user_id)),
    };
    resource::list_at(transport, &url, auth_token, ROLES.plural, &[]).await
}

/// Update a tenant; v2 uses `POST /tenants/{id}` with the id echoed in the body.
pub async fn update_tenant(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    tenant_id: &str,
    params: &TenantParams,
) -> Result<Tenant> {
    let mut body = serde_json::to_value(params)
        .map_err(|e| ClientError::InvalidParameters(e.to_string()))?;
    body["id"] = json!(tenant_id);
    resource::update(
        transport,
        base_url,
        auth_token,
        TENANTS,
        Method::POST,
        tenant_id,
        &body,
    )
    .await
}

/// `PUT /users/{id}/OS-KSADM/<attribute>` with `{"user": {"id": .., <field>: value}}`.
async fn update_user_attribute(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    attribute: &str,
    field: &str,
    value: serde_json::Value,
) -> Result<User> {
    let url = format!("{}/OS-KSADM/{attribute}", USERS.item_url(base_url, user_id));
    let body = json!({ "id": user_id, field: value });
    resource::send_item(transport, Method::PUT, &url, auth_token, USERS.singular, &body).await
}

pub async fn update_user_password(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    password: &str,
) -> Result<User> {
    update_user_attribute(
        transport,
        base_url,
        auth_token,
        user_id,
        "password",
        "password",
        json!(password),
    )
    .await
}

pub async fn update_user_tenant(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    tenant_id: &str,
) -> Result<User> {
    update_user_attribute(
        transport,
        base_url,
        auth_token,
        user_id,
        "tenant",
        "tenantId",
        json!(tenant_id),
    )
    .await
}

pub async fn update_user_enabled(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    enabled: bool,
) -> Result<User> {
    update_user_attribute(
        transport,
        base_url,
        auth_token,
        user_id,
        "enabled",
        "enabled",
        json!(enabled),
    )
    .await
}

/// Update name/email with `PUT /users/{id}`.
pub async fn update_user(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    user_id: &str,
    params: &UpdateUserParams,
) -> Result<User> {
    let mut body = serde_json::to_value(params)
        .map_err(|e| ClientError::InvalidParameters(e.to_string()))?;
    body["id"] = json!(user_id);
    resource::update(
        transport,
        base_url,
        auth_token,
        USERS,
        Method::PUT,
        user_id,
        &body,
    )
    .await
}
