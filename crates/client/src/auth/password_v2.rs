//! Password or token authentication against the v2.0 API.

use serde::Serialize;

use super::{AuthParameters, AuthPlugin, TokenRequest, unset};
use crate::error::{ClientError, Result};
use keystone_config::constants::V2_TOKENS_PATH;

#[derive(Serialize)]
struct Request<'a> {
    auth: Auth<'a>,
}

#[derive(Serialize)]
struct Auth<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<TokenRef<'a>>,
    #[serde(rename = "passwordCredentials", skip_serializing_if = "Option::is_none")]
    password_credentials: Option<PasswordCredentials<'a>>,
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
    #[serde(rename = "tenantName", skip_serializing_if = "Option::is_none")]
    tenant_name: Option<&'a str>,
}

#[derive(Serialize)]
struct TokenRef<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Authenticates with `POST {auth_url}/tokens`.
///
/// A token, when present, is used instead of the password. A tenant id is
/// sent in preference to a tenant name.
#[derive(Debug, Clone)]
pub struct PasswordV2Plugin {
    params: AuthParameters,
}

impl PasswordV2Plugin {
    pub fn new(params: AuthParameters) -> Self {
        Self { params }
    }

    fn request_body(&self) -> Result<serde_json::Value> {
        let p = &self.params;
        let (token, password_credentials) = match (p.token(), p.username(), p.password()) {
            (Some(id), _, _) => (Some(TokenRef { id }), None),
            (None, Some(username), Some(password)) => {
                (None, Some(PasswordCredentials { username, password }))
            }
            _ => return Err(self.missing()),
        };

        let tenant_id = p.tenant_id();
        let request = Request {
            auth: Auth {
                token,
                password_credentials,
                tenant_id,
                tenant_name: if tenant_id.is_some() {
                    None
                } else {
                    p.tenant_name()
                },
            },
        };

        serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidParameters(format!("cannot encode request: {e}")))
    }

    fn missing(&self) -> ClientError {
        let p = &self.params;
        let mut missing = unset(&[("auth_url", p.auth_url())]);
        let has_password = p.username().is_some() && p.password().is_some();
        if !has_password && p.token().is_none() {
            missing.extend(unset(&[
                ("username", p.username()),
                ("password", p.password()),
                ("token", p.token()),
            ]));
        }
        ClientError::InsufficientCredentials { missing }
    }
}

impl AuthPlugin for PasswordV2Plugin {
    fn auth_system(&self) -> &'static str {
        super::PASSWORD_V2
    }

    fn params(&self) -> &AuthParameters {
        &self.params
    }

    fn params_mut(&mut self) -> &mut AuthParameters {
        &mut self.params
    }

    fn sufficient_options(&self) -> Result<()> {
        match self.missing() {
            ClientError::InsufficientCredentials { missing } if missing.is_empty() => Ok(()),
            err => Err(err),
        }
    }

    fn token_request(&self) -> Result<Option<TokenRequest>> {
        let auth_url = self.params.auth_url().ok_or_else(|| self.missing())?;
        Ok(Some(TokenRequest {
            url: format!("{auth_url}{V2_TOKENS_PATH}"),
            body: self.request_body()?,
            auth_token: None,
        }))
    }
}
