//! Role API methods for [`KeystoneClient`] (v2 `OS-KSADM` extension).

use crate::client::KeystoneClient;
use crate::endpoints::{resource, v2};
use crate::error::Result;
use crate::models::v2::Role;

impl KeystoneClient {
    pub async fn list_roles(&mut self) -> Result<Vec<Role>> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::list(&self.transport, &__base, &__token, v2::ROLES, &[]).await
        )
    }

    pub async fn get_role(&mut self, role_id: &str) -> Result<Role> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::get(&self.transport, &__base, &__token, v2::ROLES, role_id).await
        )
    }

    pub async fn create_role(&mut self, name: &str) -> Result<Role> {
        let params = serde_json::json!({ "name": name });
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::create(&self.transport, &__base, &__token, v2::ROLES, &params).await
        )
    }

    pub async fn delete_role(&mut self, role_id: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::delete(&self.transport, &__base, &__token, v2::ROLES, role_id).await
        )
    }
}
