//! v3 API methods.
//!
//! [`IdentityV3`] borrows the client mutably for the duration of a call chain,
//! so v3 calls share the client's token and retry behaviour.
//!
//! # What this module does NOT handle:
//! - Authentication and session management (in [`crate::client::session`])
//! - Low-level HTTP calls (in [`crate::endpoints::v3`])

use reqwest::Method;

use crate::client::KeystoneClient;
use crate::endpoints::v3::{self, GrantActor, GrantTarget};
use crate::endpoints::{Query, resource};
use crate::error::Result;
use crate::models::v3::{
    Credential, CredentialParams, Domain, DomainParams, Endpoint, EndpointParams, Group,
    GroupParams, Policy, PolicyParams, Project, ProjectParams, Role, RoleParams, Service,
    ServiceParams, User, UserParams,
};

/// Handle for v3 calls; see [`KeystoneClient::v3`].
#[derive(Debug)]
pub struct IdentityV3<'a> {
    client: &'a mut KeystoneClient,
}

/// List/get/create/update/delete for one collection.
macro_rules! crud_methods {
    (
        $collection:expr, $model:ty, $params:ty,
        $list:ident, $get:ident, $create:ident, $update:ident, $delete:ident
    ) => {
        pub async fn $list(&mut self, query: Query<'_>) -> Result<Vec<$model>> {
            crate::retry_call!(
                self.client,
                __token,
                __base,
                resource::list(&self.client.transport, &__base, &__token, $collection, query).await
            )
        }

        pub async fn $get(&mut self, id: &str) -> Result<$model> {
            crate::retry_call!(
                self.client,
                __token,
                __base,
                resource::get(&self.client.transport, &__base, &__token, $collection, id).await
            )
        }

        pub async fn $create(&mut self, params: &$params) -> Result<$model> {
            crate::retry_call!(
                self.client,
                __token,
                __base,
                resource::create(&self.client.transport, &__base, &__token, $collection, params)
                    .await
            )
        }

        pub async fn $update(&mut self, id: &str, params: &$params) -> Result<$model> {
            crate::retry_call!(
                self.client,
                __token,
                __base,
                resource::update(
                    &self.client.transport,
                    &__base,
                    &__token,
                    $collection,
                    Method::PATCH,
                    id,
                    params,
                )
                .await
            )
        }

        pub async fn $delete(&mut self, id: &str) -> Result<()> {
            crate::retry_call!(
                self.client,
                __token,
                __base,
                resource::delete(&self.client.transport, &__base, &__token, $collection, id).await
            )
        }
    };
}

impl<'a> IdentityV3<'a> {
    pub(crate) fn new(client: &'a mut KeystoneClient) -> Self {
        Self { client }
    }

    crud_methods!(
        v3::PROJECTS, Project, ProjectParams,
        list_projects, get_project, create_project, update_project, delete_project
    );
    crud_methods!(
        v3::DOMAINS, Domain, DomainParams,
        list_domains, get_domain, create_domain, update_domain, delete_domain
    );
    crud_methods!(
        v3::USERS, User, UserParams,
        list_users, get_user, create_user, update_user, delete_user
    );
    crud_methods!(
        v3::GROUPS, Group, GroupParams,
        list_groups, get_group, create_group, update_group, delete_group
    );
    crud_methods!(
        v3::ROLES, Role, RoleParams,
        list_roles, get_role, create_role, update_role, delete_role
    );
    crud_methods!(
        v3::SERVICES, Service, ServiceParams,
        list_services, get_service, create_service, update_service, delete_service
    );
    crud_methods!(
        v3::ENDPOINTS, Endpoint, EndpointParams,
        list_endpoints, get_endpoint, create_endpoint, update_endpoint, delete_endpoint
    );
    crud_methods!(
        v3::POLICIES, Policy, PolicyParams,
        list_policies, get_policy, create_policy, update_policy, delete_policy
    );
    crud_methods!(
        v3::CREDENTIALS, Credential, CredentialParams,
        list_credentials, get_credential, create_credential, update_credential, delete_credential
    );

    /// Grant `role_id` to a user or group on a project or domain.
    pub async fn grant_role(
        &mut self,
        target: GrantTarget<'_>,
        actor: GrantActor<'_>,
        role_id: &str,
    ) -> Result<()> {
        crate::retry_call!(
            self.client,
            __token,
            __base,
            v3::grant_role(&self.client.transport, &__base, &__token, target, actor, role_id).await
        )
    }

    pub async fn revoke_role(
        &mut self,
        target: GrantTarget<'_>,
        actor: GrantActor<'_>,
        role_id: &str,
    ) -> Result<()> {
        crate::retry_call!(
            self.client,
            __token,
            __base,
            v3::revoke_role(&self.client.transport, &__base, &__token, target, actor, role_id)
                .await
        )
    }

    pub async fn add_user_to_group(&mut self, group_id: &str, user_id: &str) -> Result<()> {
        crate::retry_call!(
            self.client,
            __token,
            __base,
            v3::add_user_to_group(&self.client.transport, &__base, &__token, group_id, user_id)
                .await
        )
    }

    pub async fn remove_user_from_group(&mut self, group_id: &str, user_id: &str) -> Result<()> {
        crate::retry_call!(
            self.client,
            __token,
            __base,
            v3::remove_user_from_group(&self.client.transport, &__base, &__token, group_id, user_id)
                .await
        )
    }
}
