//! Normalized view of an authentication response.
//!
//! Responsibilities:
//! - Detect whether a token response has the v2 (`access`) or v3 (`token`) shape.
//! - Extract token value, expiry, identity, scope and service catalog.
//! - Answer staleness and catalog lookups.
//!
//! Does NOT handle:
//! - Issuing the authentication request (see `auth` and `endpoints::auth`).
//! - Caching (see `cache`).
//!
//! Invariants:
//! - `auth_token` is never empty.
//! - A missing or empty expiry means the token never expires.
//! - An `AccessInfo` is replaced wholesale on re-authentication, never patched.

mod catalog;
mod wire;

pub use catalog::{CatalogService, EndpointSet, Interface, ServiceCatalog};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use keystone_config::IdentityApiVersion;
use keystone_config::constants::IDENTITY_SERVICE_TYPE;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Header carrying the v3 token id.
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Result of a successful authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInfo {
    auth_token: String,
    version: IdentityApiVersion,
    expires_at: Option<DateTime<Utc>>,
    issued_at: Option<DateTime<Utc>>,
    user_id: Option<String>,
    user_name: Option<String>,
    user_domain_id: Option<String>,
    user_domain_name: Option<String>,
    project_id: Option<String>,
    project_name: Option<String>,
    project_domain_id: Option<String>,
    project_domain_name: Option<String>,
    domain_id: Option<String>,
    domain_name: Option<String>,
    service_catalog: ServiceCatalog,
}

impl fmt::Debug for AccessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessInfo")
            .field("auth_token", &"<redacted>")
            .field("version", &self.version)
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .field("project_id", &self.project_id)
            .field("domain_id", &self.domain_id)
            .field("services", &self.service_catalog.services().len())
            .finish()
    }
}

impl AccessInfo {
    /// Build an `AccessInfo` from a token response body and its headers.
    ///
    /// A body with a top-level `access` object is read as v2; one with a
    /// top-level `token` object is read as v3, taking the token id from the
    /// `X-Subject-Token` header.
    pub fn factory(body: &serde_json::Value, headers: &HeaderMap) -> Result<Self> {
        if body.get("access").is_some() {
            let parsed: wire::V2Body = serde_json::from_value(body.clone())
                .map_err(|e| ClientError::MalformedResponse(format!("v2 token response: {e}")))?;
            Self::from_v2(parsed)
        } else if body.get("token").is_some() {
            let token_id = headers
                .get(SUBJECT_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let parsed: wire::V3Body = serde_json::from_value(body.clone())
                .map_err(|e| ClientError::MalformedResponse(format!("v3 token response: {e}")))?;
            Self::from_v3(token_id, parsed)
        } else {
            Err(ClientError::MalformedResponse(
                "response has neither an 'access' nor a 'token' object".to_string(),
            ))
        }
    }

    fn from_v2(body: wire::V2Body) -> Result<Self> {
        let access = body.access;
        let auth_token = non_empty_token(access.token.id, "access.token.id")?;
        let tenant = access.token.tenant.unwrap_or_default();
        let user = access.user.unwrap_or_default();

        let services = access
            .service_catalog
            .into_iter()
            .map(|service| {
                let mut entry = CatalogService::new(service.service_type, service.name);
                // Each v2 record already carries all of its interfaces.
                for endpoint in service.endpoints {
                    let urls: BTreeMap<_, _> = [
                        (Interface::Public, endpoint.public_url),
                        (Interface::Internal, endpoint.internal_url),
                        (Interface::Admin, endpoint.admin_url),
                    ]
                    .into_iter()
                    .filter_map(|(interface, url)| url.map(|url| (interface, url)))
                    .collect();
                    if !urls.is_empty() {
                        entry.endpoints.push(EndpointSet {
                            region: endpoint.region,
                            urls,
                        });
                    }
                }
                entry
            })
            .collect();

        Ok(Self {
            auth_token,
            version: IdentityApiVersion::V2,
            expires_at: parse_timestamp(access.token.expires.as_deref(), "expires")?,
            issued_at: parse_timestamp(access.token.issued_at.as_deref(), "issued_at")?,
            user_id: user.id,
            user_name: user.name.or(user.username),
            user_domain_id: None,
            user_domain_name: None,
            project_id: tenant.id,
            project_name: tenant.name,
            project_domain_id: None,
            project_domain_name: None,
            domain_id: None,
            domain_name: None,
            service_catalog: ServiceCatalog::new(services),
        })
    }

    fn from_v3(token_id: Option<String>, body: wire::V3Body) -> Result<Self> {
        let auth_token = non_empty_token(token_id, SUBJECT_TOKEN_HEADER)?;
        let token = body.token;
        let user = token.user.unwrap_or_default();
        let user_domain = user.domain.unwrap_or_default();
        let project = token.project.unwrap_or_default();
        let project_domain = project.domain.unwrap_or_default();
        let domain = token.domain.unwrap_or_default();

        let services = token
            .catalog
            .into_iter()
            .map(|service| {
                let mut entry = CatalogService::new(service.service_type, service.name);
                for endpoint in service.endpoints {
                    match endpoint.interface.parse::<Interface>() {
                        Ok(interface) => entry.add_endpoint(
                            endpoint.region.or(endpoint.region_id),
                            interface,
                            endpoint.url,
                        ),
                        Err(reason) => tracing::debug!(%reason, "skipping catalog endpoint"),
                    }
                }
                entry
            })
            .collect();

        Ok(Self {
            auth_token,
            version: IdentityApiVersion::V3,
            expires_at: parse_timestamp(token.expires_at.as_deref(), "expires_at")?,
            issued_at: parse_timestamp(token.issued_at.as_deref(), "issued_at")?,
            user_id: user.id,
            user_name: user.name,
            user_domain_id: user_domain.id,
            user_domain_name: user_domain.name,
            project_id: project.id,
            project_name: project.name,
            project_domain_id: project_domain.id,
            project_domain_name: project_domain.name,
            domain_id: domain.id,
            domain_name: domain.name,
            service_catalog: ServiceCatalog::new(services),
        })
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Protocol version of the response this was built from.
    pub fn version(&self) -> IdentityApiVersion {
        self.version
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn user_domain_id(&self) -> Option<&str> {
        self.user_domain_id.as_deref()
    }

    pub fn user_domain_name(&self) -> Option<&str> {
        self.user_domain_name.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// v2 name for [`AccessInfo::project_id`].
    pub fn tenant_id(&self) -> Option<&str> {
        self.project_id()
    }

    /// v2 name for [`AccessInfo::project_name`].
    pub fn tenant_name(&self) -> Option<&str> {
        self.project_name()
    }

    pub fn project_domain_id(&self) -> Option<&str> {
        self.project_domain_id.as_deref()
    }

    pub fn project_domain_name(&self) -> Option<&str> {
        self.project_domain_name.as_deref()
    }

    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn project_scoped(&self) -> bool {
        self.project_id.is_some()
    }

    pub fn domain_scoped(&self) -> bool {
        self.domain_id.is_some()
    }

    pub fn scoped(&self) -> bool {
        self.project_scoped() || self.domain_scoped()
    }

    pub fn service_catalog(&self) -> &ServiceCatalog {
        &self.service_catalog
    }

    /// Admin URLs of the identity service, filtered by region when given.
    pub fn management_url(&self, region: Option<&str>) -> Vec<String> {
        self.service_catalog
            .urls_for(IDENTITY_SERVICE_TYPE, Interface::Admin, region)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Public URLs of the identity service, the endpoints this token can be
    /// renewed against.
    pub fn auth_urls(&self, region: Option<&str>) -> Vec<String> {
        self.service_catalog
            .urls_for(IDENTITY_SERVICE_TYPE, Interface::Public, region)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// True iff the token expires within `margin` from now.
    pub fn will_expire_soon(&self, margin: Duration) -> bool {
        self.will_expire_soon_at(Utc::now(), margin)
    }

    /// [`AccessInfo::will_expire_soon`] against an explicit clock reading.
    pub fn will_expire_soon_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        let Some(expires_at) = self.expires_at else {
            return false;
        };
        let margin = TimeDelta::from_std(margin).unwrap_or(TimeDelta::MAX);
        expires_at - now <= margin
    }
}

fn non_empty_token(token: Option<String>, field: &str) -> Result<String> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ClientError::MalformedResponse(format!(
            "token id missing from {field}"
        ))),
    }
}

/// Parse an ISO-8601 timestamp; values without a zone are UTC.
fn parse_timestamp(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| ClientError::MalformedResponse(format!("invalid {field} '{raw}': {e}")))
}
