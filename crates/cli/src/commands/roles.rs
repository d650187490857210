//! Role command implementation (v2).
//!
//! Responsibilities:
//! - List, show, create and delete roles.
//! - Grant and revoke a role for a user on a tenant.
//!
//! Does NOT handle:
//! - v3 grants on projects and domains (see projects and domains modules).
//!
//! Invariants:
//! - Users, roles and tenants may be named by id or by name.

use anyhow::Result;
use clap::Subcommand;
use keystone_client::models::v2::Role;
use keystone_client::{ClientError, KeystoneClient};
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::tenants::find_tenant;
use crate::commands::users::find_user;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    /// List roles
    List,
    /// Show a role
    Show {
        /// Role name or id
        role: String,
    },
    /// Create a role
    Create {
        #[arg(long)]
        name: String,
    },
    /// Delete a role
    Delete {
        /// Role name or id
        role: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Grant a role to a user on a tenant
    Grant {
        /// User name or id
        #[arg(long)]
        user: String,
        /// Role name or id
        #[arg(long)]
        role: String,
        /// Tenant name or id
        #[arg(long)]
        tenant: String,
    },
    /// Revoke a role from a user on a tenant
    Revoke {
        #[arg(long)]
        user: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        tenant: String,
    },
}

pub async fn run(
    config: Config,
    command: RolesCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        RolesCommand::List => run_list(config, format, cancel).await,
        RolesCommand::Show { role } => run_show(config, &role, format, cancel).await,
        RolesCommand::Create { name } => run_create(config, &name, format, cancel).await,
        RolesCommand::Delete { role, force } => run_delete(config, &role, force, cancel).await,
        RolesCommand::Grant { user, role, tenant } => {
            run_grant(config, &user, &role, &tenant, true, cancel).await
        }
        RolesCommand::Revoke { user, role, tenant } => {
            run_grant(config, &user, &role, &tenant, false, cancel).await
        }
    }
}

/// Look a role up by id, falling back to a name match.
pub(crate) async fn find_role(
    client: &mut KeystoneClient,
    name_or_id: &str,
    cancel: &CancellationToken,
) -> Result<Role> {
    match cancellable!(client.get_role(name_or_id), cancel) {
        Ok(role) => Ok(role),
        Err(e)
            if e.downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_not_found) =>
        {
            let roles = cancellable!(client.list_roles(), cancel)?;
            roles
                .into_iter()
                .find(|role| role.name == name_or_id)
                .ok_or(e)
        }
        Err(e) => Err(e),
    }
}

async fn run_list(config: Config, format: OutputFormat, cancel: &CancellationToken) -> Result<()> {
    info!("Listing roles");

    let mut client = crate::commands::build_client(&config)?;
    let roles = cancellable!(client.list_roles(), cancel)?;

    output_result(&format_list(&roles, format)?);
    Ok(())
}

async fn run_show(
    config: Config,
    role: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Showing role: {}", role);

    let mut client = crate::commands::build_client(&config)?;
    let role = find_role(&mut client, role, cancel).await?;

    output_result(&format_item(&role, format)?);
    Ok(())
}

async fn run_create(
    config: Config,
    name: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Creating role: {}", name);

    let mut client = crate::commands::build_client(&config)?;
    let role = cancellable!(client.create_role(name), cancel)?;

    output_result(&format_item(&role, format)?);
    Ok(())
}

async fn run_delete(
    config: Config,
    role: &str,
    force: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !crate::interactive::confirmed(force, role, "role")? {
        return Ok(());
    }

    info!("Deleting role: {}", role);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_role(&mut client, role, cancel).await?;
    cancellable!(client.delete_role(&current.id), cancel)?;

    println!("Role '{}' deleted successfully.", current.name);
    Ok(())
}

async fn run_grant(
    config: Config,
    user: &str,
    role: &str,
    tenant: &str,
    grant: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(grant, "Changing role {} of user {} on tenant {}", role, user, tenant);

    let mut client = crate::commands::build_client(&config)?;
    let user = find_user(&mut client, user, cancel).await?;
    let role = find_role(&mut client, role, cancel).await?;
    let tenant = find_tenant(&mut client, tenant, cancel).await?;

    if grant {
        cancellable!(
            client.add_tenant_user_role(&tenant.id, &user.id, &role.id),
            cancel
        )?;
        println!("Role '{}' granted on tenant '{}'.", role.name, tenant.name);
    } else {
        cancellable!(
            client.remove_tenant_user_role(&tenant.id, &user.id, &role.id),
            cancel
        )?;
        println!("Role '{}' revoked on tenant '{}'.", role.name, tenant.name);
    }
    Ok(())
}
