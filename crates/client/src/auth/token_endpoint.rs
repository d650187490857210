//! Pre-issued token used directly against a fixed endpoint.

use super::{AuthParameters, AuthPlugin, TokenRequest};
use crate::access::{AccessInfo, Interface};
use crate::error::{ClientError, Result};

/// Sends a known token to a known endpoint without contacting the identity service.
#[derive(Debug, Clone)]
pub struct TokenEndpointPlugin {
    params: AuthParameters,
}

impl TokenEndpointPlugin {
    pub fn new(params: AuthParameters) -> Self {
        Self { params }
    }
}

impl AuthPlugin for TokenEndpointPlugin {
    fn auth_system(&self) -> &'static str {
        super::TOKEN_ENDPOINT
    }

    fn params(&self) -> &AuthParameters {
        &self.params
    }

    fn params_mut(&mut self) -> &mut AuthParameters {
        &mut self.params
    }

    fn sufficient_options(&self) -> Result<()> {
        Ok(())
    }

    fn token_request(&self) -> Result<Option<TokenRequest>> {
        Ok(None)
    }

    fn token_and_endpoint(
        &self,
        _access: Option<&AccessInfo>,
        _service_type: &str,
        _interface: Interface,
        _region: Option<&str>,
    ) -> Result<(String, String)> {
        match (self.params.token(), self.params.endpoint()) {
            (Some(token), Some(endpoint)) => Ok((token.to_string(), endpoint.to_string())),
            _ => Err(ClientError::AuthorizationFailure(
                "token-endpoint authentication needs both a token and an endpoint".to_string(),
            )),
        }
    }
}
