//! User API methods for [`KeystoneClient`] (v2 admin API).
//!
//! # What this module does NOT handle:
//! - Authentication and session management (in [`crate::client::session`])
//! - Low-level HTTP calls (in [`crate::endpoints::v2`])

use crate::client::KeystoneClient;
use crate::endpoints::{resource, v2};
use crate::error::Result;
use crate::models::v2::{CreateUserParams, Role, UpdateUserParams, User};

impl KeystoneClient {
    /// List users, or only the users of `tenant_id` when given.
    pub async fn list_users(
        &mut self,
        tenant_id: Option<&str>,
        limit: Option<usize>,
        marker: Option<&str>,
    ) -> Result<Vec<User>> {
        if let Some(tenant_id) = tenant_id {
            return self.list_tenant_users(tenant_id).await;
        }
        let limit = limit.map(|l| l.to_string());
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::list(
                &self.transport,
                &__base,
                &__token,
                v2::USERS,
                &[("limit", limit.as_deref()), ("marker", marker)],
            )
            .await
        )
    }

    pub async fn get_user(&mut self, user_id: &str) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::get(&self.transport, &__base, &__token, v2::USERS, user_id).await
        )
    }

    pub async fn create_user(&mut self, params: &CreateUserParams) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::create(&self.transport, &__base, &__token, v2::USERS, params).await
        )
    }

    /// Update name and/or email.
    pub async fn update_user(&mut self, user_id: &str, params: &UpdateUserParams) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::update_user(&self.transport, &__base, &__token, user_id, params).await
        )
    }

    pub async fn update_user_password(&mut self, user_id: &str, password: &str) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::update_user_password(&self.transport, &__base, &__token, user_id, password).await
        )
    }

    /// Change the user's default tenant.
    pub async fn update_user_tenant(&mut self, user_id: &str, tenant_id: &str) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::update_user_tenant(&self.transport, &__base, &__token, user_id, tenant_id).await
        )
    }

    pub async fn update_user_enabled(&mut self, user_id: &str, enabled: bool) -> Result<User> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::update_user_enabled(&self.transport, &__base, &__token, user_id, enabled).await
        )
    }

    pub async fn delete_user(&mut self, user_id: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::delete(&self.transport, &__base, &__token, v2::USERS, user_id).await
        )
    }

    /// Roles of the user, on `tenant_id` when given.
    pub async fn list_user_roles(
        &mut self,
        user_id: &str,
        tenant_id: Option<&str>,
    ) -> Result<Vec<Role>> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::list_user_roles(&self.transport, &__base, &__token, user_id, tenant_id).await
        )
    }
}
