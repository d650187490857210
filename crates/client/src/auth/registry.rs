//! Plugin lookup by tag.
//!
//! The registry is an explicit value owned by whoever builds clients; there is
//! no process-wide plugin table.

use std::collections::BTreeMap;

use super::{AuthParameters, AuthPlugin, PasswordV2Plugin, PasswordV3Plugin, TokenEndpointPlugin};
use crate::error::{ClientError, Result};
use keystone_config::IdentityApiVersion;

pub const PASSWORD_V2: &str = "password-v2";
pub const PASSWORD_V3: &str = "password-v3";
pub const TOKEN_ENDPOINT: &str = "token-endpoint";

/// Builds a plugin from its parameters.
pub type PluginConstructor = fn(AuthParameters) -> Box<dyn AuthPlugin>;

fn password_v2(params: AuthParameters) -> Box<dyn AuthPlugin> {
    Box::new(PasswordV2Plugin::new(params))
}

fn password_v3(params: AuthParameters) -> Box<dyn AuthPlugin> {
    Box::new(PasswordV3Plugin::new(params))
}

fn token_endpoint(params: AuthParameters) -> Box<dyn AuthPlugin> {
    Box::new(TokenEndpointPlugin::new(params))
}

/// Maps plugin tags to constructors.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    constructors: BTreeMap<String, PluginConstructor>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Registry holding the built-in plugins.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(PASSWORD_V2, password_v2);
        registry.register(PASSWORD_V3, password_v3);
        registry.register(TOKEN_ENDPOINT, token_endpoint);
        registry
    }

    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register or replace a constructor.
    pub fn register(&mut self, tag: impl Into<String>, constructor: PluginConstructor) {
        self.constructors.insert(tag.into(), constructor);
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiate the plugin registered under `tag`.
    pub fn create(&self, tag: &str, params: AuthParameters) -> Result<Box<dyn AuthPlugin>> {
        let constructor = self.constructors.get(tag).ok_or_else(|| {
            ClientError::InvalidParameters(format!("unknown auth system '{tag}'"))
        })?;
        Ok(constructor(params))
    }

    /// Tag of the plugin matching the parameters.
    ///
    /// Without an auth URL the token-endpoint plugin is used; otherwise the
    /// password plugin of the requested protocol version.
    pub fn select_tag(params: &AuthParameters, version: IdentityApiVersion) -> &'static str {
        if params.auth_url().is_none() {
            return TOKEN_ENDPOINT;
        }
        match version {
            IdentityApiVersion::V2 => PASSWORD_V2,
            IdentityApiVersion::V3 => PASSWORD_V3,
        }
    }

    pub fn select(
        &self,
        params: AuthParameters,
        version: IdentityApiVersion,
    ) -> Result<Box<dyn AuthPlugin>> {
        let tag = Self::select_tag(&params, version);
        self.create(tag, params)
    }
}
