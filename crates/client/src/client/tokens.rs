//! Token API methods for [`KeystoneClient`] (v2 admin API).

use crate::access::{AccessInfo, ServiceCatalog};
use crate::client::KeystoneClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl KeystoneClient {
    /// Validate `token`, returning what it grants.
    pub async fn validate_token(&mut self, token: &str) -> Result<AccessInfo> {
        crate::retry_call!(
            self,
            __token,
            __base,
            endpoints::validate_token(&self.transport, &__base, &__token, token).await
        )
    }

    /// Revoke `token`.
    pub async fn delete_token(&mut self, token: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            endpoints::delete_token(&self.transport, &__base, &__token, token).await
        )
    }

    /// Service catalog of the current token, authenticating first when needed.
    pub async fn catalog(&mut self) -> Result<ServiceCatalog> {
        self.auth_token().await?;
        self.access
            .as_ref()
            .map(|access| access.service_catalog().clone())
            .ok_or_else(|| {
                ClientError::AuthorizationFailure(
                    "a pre-issued token carries no service catalog".to_string(),
                )
            })
    }
}
