//! Tenant API methods for [`KeystoneClient`] (v2 admin API).
//!
//! # What this module handles:
//! - Tenant CRUD, tenant membership listing and role grants on tenants
//!
//! # What this module does NOT handle:
//! - Authentication and session management (in [`crate::client::session`])
//! - Low-level HTTP calls (in [`crate::endpoints::v2`])

use crate::client::KeystoneClient;
use crate::endpoints::{resource, v2};
use crate::error::Result;
use crate::models::v2::{Tenant, TenantParams, User};

impl KeystoneClient {
    /// List tenants, optionally paginated with `limit` and `marker`.
    pub async fn list_tenants(
        &mut self,
        limit: Option<usize>,
        marker: Option<&str>,
    ) -> Result<Vec<Tenant>> {
        let limit = limit.map(|l| l.to_string());
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::list(
                &self.transport,
                &__base,
                &__token,
                v2::TENANTS,
                &[("limit", limit.as_deref()), ("marker", marker)],
            )
            .await
        )
    }

    pub async fn get_tenant(&mut self, tenant_id: &str) -> Result<Tenant> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::get(&self.transport, &__base, &__token, v2::TENANTS, tenant_id).await
        )
    }

    pub async fn create_tenant(&mut self, params: &TenantParams) -> Result<Tenant> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::create(&self.transport, &__base, &__token, v2::TENANTS, params).await
        )
    }

    pub async fn update_tenant(&mut self, tenant_id: &str, params: &TenantParams) -> Result<Tenant> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::update_tenant(&self.transport, &__base, &__token, tenant_id, params).await
        )
    }

    pub async fn delete_tenant(&mut self, tenant_id: &str) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            resource::delete(&self.transport, &__base, &__token, v2::TENANTS, tenant_id).await
        )
    }

    /// Users holding a role on the tenant.
    pub async fn list_tenant_users(&mut self, tenant_id: &str) -> Result<Vec<User>> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::list_tenant_users(&self.transport, &__base, &__token, tenant_id).await
        )
    }

    pub async fn add_tenant_user_role(
        &mut self,
        tenant_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::add_user_role(&self.transport, &__base, &__token, tenant_id, user_id, role_id)
                .await
        )
    }

    pub async fn remove_tenant_user_role(
        &mut self,
        tenant_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        crate::retry_call!(
            self,
            __token,
            __base,
            v2::remove_user_role(&self.transport, &__base, &__token, tenant_id, user_id, role_id)
                .await
        )
    }

    /// Tenant with `name`, scanning the full listing.
    pub async fn find_tenant_by_name(&mut self, name: &str) -> Result<Option<Tenant>> {
        let tenants = self.list_tenants(None, None).await?;
        Ok(tenants.into_iter().find(|tenant| tenant.name == name))
    }
}
