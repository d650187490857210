//! [`ResourceDisplay`] implementations for client models.
//!
//! Adding a resource type means implementing the trait here; both formatters
//! pick it up through `format_list`/`format_item`.

use keystone_client::models::{v2, v3};
use keystone_client::{AccessInfo, Interface, ServiceCatalog};
use serde::Serialize;

use super::{ResourceDisplay, format_missing, format_missing_display};

impl ResourceDisplay for v2::Tenant {
    const PLURAL: &'static str = "tenants";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "enabled", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_missing_display(self.enabled),
            format_missing(self.description.as_deref()),
        ]
    }
}

impl ResourceDisplay for v2::User {
    const PLURAL: &'static str = "users";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "enabled", "email", "tenantId"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format_missing(self.name.as_deref()),
            format_missing_display(self.enabled),
            format_missing(self.email.as_deref()),
            format_missing(self.tenant_id.as_deref()),
        ]
    }
}

impl ResourceDisplay for v2::Role {
    const PLURAL: &'static str = "roles";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}

impl ResourceDisplay for v2::Service {
    const PLURAL: &'static str = "services";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "type", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.service_type.clone(),
            format_missing(self.description.as_deref()),
        ]
    }
}

impl ResourceDisplay for v2::Endpoint {
    const PLURAL: &'static str = "endpoints";

    fn headers() -> Vec<&'static str> {
        vec!["id", "region", "service_id", "publicurl", "internalurl", "adminurl"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format_missing(self.region.as_deref()),
            format_missing(self.service_id.as_deref()),
            format_missing(self.publicurl.as_deref()),
            format_missing(self.internalurl.as_deref()),
            format_missing(self.adminurl.as_deref()),
        ]
    }
}

impl ResourceDisplay for v3::Project {
    const PLURAL: &'static str = "projects";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "domain_id", "enabled", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_missing(self.domain_id.as_deref()),
            format_missing_display(self.enabled),
            format_missing(self.description.as_deref()),
        ]
    }
}

impl ResourceDisplay for v3::Domain {
    const PLURAL: &'static str = "domains";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "enabled", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_missing_display(self.enabled),
            format_missing(self.description.as_deref()),
        ]
    }
}

impl ResourceDisplay for v3::Group {
    const PLURAL: &'static str = "groups";

    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "domain_id", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_missing(self.domain_id.as_deref()),
            format_missing(self.description.as_deref()),
        ]
    }
}

impl ResourceDisplay for v3::Policy {
    const PLURAL: &'static str = "policies";

    fn headers() -> Vec<&'static str> {
        vec!["id", "type", "blob"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.policy_type.clone(), self.blob.clone()]
    }
}

impl ResourceDisplay for v3::Credential {
    const PLURAL: &'static str = "credentials";

    fn headers() -> Vec<&'static str> {
        vec!["id", "type", "user_id", "project_id", "blob"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.credential_type.clone(),
            self.user_id.clone(),
            format_missing(self.project_id.as_deref()),
            self.blob.clone(),
        ]
    }
}

/// One region of one service in the catalog of the current token.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub service_type: String,
    pub name: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "publicURL")]
    pub public_url: Option<String>,
    #[serde(rename = "internalURL")]
    pub internal_url: Option<String>,
    #[serde(rename = "adminURL")]
    pub admin_url: Option<String>,
}

impl CatalogRow {
    /// Flatten the catalog, keeping only `service_type` when given.
    pub fn from_catalog(catalog: &ServiceCatalog, service_type: Option<&str>) -> Vec<Self> {
        catalog
            .services()
            .iter()
            .filter(|service| service_type.is_none_or(|wanted| service.service_type == wanted))
            .flat_map(|service| {
                service.endpoints.iter().map(|set| Self {
                    service_type: service.service_type.clone(),
                    name: service.name.clone(),
                    region: set.region.clone(),
                    public_url: set.url(Interface::Public).map(str::to_string),
                    internal_url: set.url(Interface::Internal).map(str::to_string),
                    admin_url: set.url(Interface::Admin).map(str::to_string),
                })
            })
            .collect()
    }
}

impl ResourceDisplay for CatalogRow {
    const PLURAL: &'static str = "catalog entries";

    fn headers() -> Vec<&'static str> {
        vec!["type", "name", "region", "publicURL", "internalURL", "adminURL"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.service_type.clone(),
            format_missing(self.name.as_deref()),
            format_missing(self.region.as_deref()),
            format_missing(self.public_url.as_deref()),
            format_missing(self.internal_url.as_deref()),
            format_missing(self.admin_url.as_deref()),
        ]
    }
}

/// What a token grants, without the token itself unless asked for.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSummary {
    pub id: String,
    pub expires: Option<String>,
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub domain_id: Option<String>,
}

impl TokenSummary {
    pub fn new(id: impl Into<String>, access: &AccessInfo) -> Self {
        Self {
            id: id.into(),
            expires: access.expires_at().map(|at| at.to_rfc3339()),
            user_id: access.user_id().map(str::to_string),
            project_id: access.project_id().map(str::to_string),
            domain_id: access.domain_id().map(str::to_string),
        }
    }
}

impl ResourceDisplay for TokenSummary {
    const PLURAL: &'static str = "tokens";

    fn headers() -> Vec<&'static str> {
        vec!["id", "expires", "user_id", "tenant_id", "domain_id"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format_missing(self.expires.as_deref()),
            format_missing(self.user_id.as_deref()),
            format_missing(self.project_id.as_deref()),
            format_missing(self.domain_id.as_deref()),
        ]
    }
}
