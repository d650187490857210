//! Identity v3 endpoints.
//!
//! Every v3 collection follows the same envelope rules and updates with
//! `PATCH`, so only grants and group membership need dedicated calls.

use super::encode_path_segment;
use super::request::HttpTransport;
use super::resource::{self, Collection};
use crate::error::Result;

pub const PROJECTS: Collection = Collection::new("/projects", "project", "projects");
pub const DOMAINS: Collection = Collection::new("/domains", "domain", "domains");
pub const USERS: Collection = Collection::new("/users", "user", "users");
pub const GROUPS: Collection = Collection::new("/groups", "group", "groups");
pub const ROLES: Collection = Collection::new("/roles", "role", "roles");
pub const SERVICES: Collection = Collection::new("/services", "service", "services");
pub const ENDPOINTS: Collection = Collection::new("/endpoints", "endpoint", "endpoints");
pub const POLICIES: Collection = Collection::new("/policies", "policy", "policies");
pub const CREDENTIALS: Collection = Collection::new("/credentials", "credential", "credentials");

/// Target of a role grant: `{projects|domains}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantTarget<'a> {
    Project(&'a str),
    Domain(&'a str),
}

/// Holder of a role grant: `{users|groups}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantActor<'a> {
    User(&'a str),
    Group(&'a str),
}

/// `{base}/{projects|domains}/{t}/{users|groups}/{a}/roles/{r}`.
pub fn grant_url(base_url: &str, target: GrantTarget<'_>, actor: GrantActor<'_>, role_id: &str) -> String {
    let target = match target {
        GrantTarget::Project(id) => PROJECTS.item_url(base_url, id),
        GrantTarget::Domain(id) => DOMAINS.item_url(base_url, id),
    };
    let (kind, actor_id) = match actor {
        GrantActor::User(id) => ("users", id),
        GrantActor::Group(id) => ("groups", id),
    };
    format!(
        "{target}/{kind}/{}/roles/{}",
        encode_path_segment(actor_id),
        encode_path_segment(role_id)
    )
}

pub async fn grant_role(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    target: GrantTarget<'_>,
    actor: GrantActor<'_>,
    role_id: &str,
) -> Result<()> {
    let url = grant_url(base_url, target, actor, role_id);
    resource::put_at(transport, &url, auth_token).await
}

pub async fn revoke_role(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    target: GrantTarget<'_>,
    actor: GrantActor<'_>,
    role_id: &str,
) -> Result<()> {
    let url = grant_url(base_url, target, actor, role_id);
    resource::delete_at(transport, &url, auth_token).await
}

fn membership_url(base_url: &str, group_id: &str, user_id: &str) -> String {
    format!(
        "{}/users/{}",
        GROUPS.item_url(base_url, group_id),
        encode_path_segment(user_id)
    )
}

pub async fn add_user_to_group(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    group_id: &str,
    user_id: &str,
) -> Result<()> {
    resource::put_at(transport, &membership_url(base_url, group_id, user_id), auth_token).await
}

pub async fn remove_user_from_group(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    group_id: &str,
    user_id: &str,
) -> Result<()> {
    resource::delete_at(transport, &membership_url(base_url, group_id, user_id), auth_token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_urls() {
        assert_eq!(
            grant_url("http://h/v3", GrantTarget::Project("p1"), GrantActor::User("u1"), "r1"),
            "http://h/v3/projects/p1/users/u1/roles/r1"
        );
        assert_eq!(
            grant_url("http://h/v3", GrantTarget::Domain("d1"), GrantActor::Group("g1"), "r1"),
            "http://h/v3/domains/d1/groups/g1/roles/r1"
        );
    }

    #[test]
    fn test_membership_url() {
        assert_eq!(
            membership_url("http://h/v3", "g1", "u1"),
            "http://h/v3/groups/g1/users/u1"
        );
    }
}
