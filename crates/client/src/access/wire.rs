//! Raw token response shapes as returned by the identity service.

use serde::Deserialize;

use crate::serde_helpers::opt_string_from_number_or_string;

#[derive(Debug, Default, Deserialize)]
pub(super) struct Ref {
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V2Body {
    pub access: V2Access,
}

#[derive(Debug, Deserialize)]
pub(super) struct V2Access {
    pub token: V2Token,
    #[serde(default)]
    pub user: Option<V2User>,
    #[serde(default, rename = "serviceCatalog")]
    pub service_catalog: Vec<V2Service>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V2Token {
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub tenant: Option<Ref>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct V2User {
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V2Service {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<V2Endpoint>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V2Endpoint {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, rename = "publicURL")]
    pub public_url: Option<String>,
    #[serde(default, rename = "internalURL")]
    pub internal_url: Option<String>,
    #[serde(default, rename = "adminURL")]
    pub admin_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V3Body {
    pub token: V3Token,
}

#[derive(Debug, Deserialize)]
pub(super) struct V3Token {
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub user: Option<V3Owned>,
    #[serde(default)]
    pub project: Option<V3Owned>,
    #[serde(default)]
    pub domain: Option<Ref>,
    #[serde(default)]
    pub catalog: Vec<V3Service>,
}

/// A user or project together with the domain owning it.
#[derive(Debug, Default, Deserialize)]
pub(super) struct V3Owned {
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<Ref>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V3Service {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<V3Endpoint>,
}

#[derive(Debug, Deserialize)]
pub(super) struct V3Endpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}
