//! Normalized service catalog.
//!
//! v2 responses list one record per region carrying all three interface URLs;
//! v3 responses list one record per interface. Both are folded into
//! [`EndpointSet`]s keyed by region so lookups do not care which shape the
//! server returned.
//!
//! Invariants:
//! - Service and endpoint order is the order the server returned; nothing is re-sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Endpoint interface (visibility) of a catalog URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    Public,
    Internal,
    Admin,
}

impl FromStr for Interface {
    type Err = String;

    /// Accepts both v3 names (`admin`) and v2 keys (`adminURL`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        match lowered.trim_end_matches("url") {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("unknown endpoint interface '{s}'")),
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        })
    }
}

/// URLs of one service in one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSet {
    pub region: Option<String>,
    pub urls: BTreeMap<Interface, String>,
}

impl EndpointSet {
    pub fn url(&self, interface: Interface) -> Option<&str> {
        self.urls.get(&interface).map(String::as_str)
    }

    fn in_region(&self, region: Option<&str>) -> bool {
        match region {
            None => true,
            Some(wanted) => self.region.as_deref() == Some(wanted),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogService {
    pub service_type: String,
    pub name: Option<String>,
    pub endpoints: Vec<EndpointSet>,
}

impl CatalogService {
    pub fn new(service_type: impl Into<String>, name: Option<String>) -> Self {
        Self {
            service_type: service_type.into(),
            name,
            endpoints: Vec::new(),
        }
    }

    /// Add a single-interface endpoint record.
    ///
    /// The record joins the first set of its region that has no URL for this
    /// interface yet; otherwise it starts a new set.
    pub fn add_endpoint(&mut self, region: Option<String>, interface: Interface, url: String) {
        let open_set = self
            .endpoints
            .iter_mut()
            .find(|set| set.region == region && !set.urls.contains_key(&interface));
        match open_set {
            Some(set) => {
                set.urls.insert(interface, url);
            }
            None => {
                let mut set = EndpointSet {
                    region,
                    urls: BTreeMap::new(),
                };
                set.urls.insert(interface, url);
                self.endpoints.push(set);
            }
        }
    }
}

/// Ordered list of services returned alongside a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    services: Vec<CatalogService>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<CatalogService>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[CatalogService] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// All URLs matching the filter, in catalog order.
    pub fn urls_for(
        &self,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
    ) -> Vec<&str> {
        self.services
            .iter()
            .filter(|service| service.service_type == service_type)
            .flat_map(|service| service.endpoints.iter())
            .filter(|set| set.in_region(region))
            .filter_map(|set| set.url(interface))
            .collect()
    }

    /// First URL matching the filter.
    pub fn url_for(
        &self,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
    ) -> Result<&str> {
        self.urls_for(service_type, interface, region)
            .into_iter()
            .next()
            .ok_or_else(|| {
                ClientError::EndpointNotFound(match region {
                    Some(region) => format!(
                        "no {interface} endpoint for service type '{service_type}' in region '{region}'"
                    ),
                    None => format!("no {interface} endpoint for service type '{service_type}'"),
                })
            })
    }
}
