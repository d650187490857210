//! Identity v2 (admin API) resources.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::serialize_opt_secret;
use crate::serde_helpers::{opt_bool_from_bool_or_string, string_from_number_or_string};

/// A tenant (project in later API versions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(deserialize_with = "string_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_bool_from_bool_or_string")]
    pub enabled: Option<bool>,
    /// Server-specific attributes, kept for display.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_bool_from_bool_or_string")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        rename = "tenantId",
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub tenant_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "string_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "string_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A catalog endpoint record carrying all three interface URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(deserialize_with = "string_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub service_id: Option<String>,
    #[serde(default)]
    pub publicurl: Option<String>,
    #[serde(default)]
    pub internalurl: Option<String>,
    #[serde(default)]
    pub adminurl: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /tenants` and `POST /tenants/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenantParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateUserParams {
    pub name: String,
    #[serde(serialize_with = "serialize_opt_secret")]
    pub password: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceParams {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEndpointParams {
    pub region: Option<String>,
    pub service_id: String,
    pub publicurl: String,
    pub adminurl: Option<String>,
    pub internalurl: Option<String>,
}
