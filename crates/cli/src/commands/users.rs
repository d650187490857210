//! User command implementation (v2).
//!
//! Responsibilities:
//! - List, show, create, update and delete users.
//! - Change a user's password, default tenant or enabled flag.
//! - List a user's roles, globally or on one tenant.
//!
//! Does NOT handle:
//! - Granting roles (see roles module).
//!
//! Invariants:
//! - Passwords never appear in logs; they are held as `SecretString`.
//! - A password missing from the command line is prompted for with confirmation.

use anyhow::{Result, bail};
use clap::Subcommand;
use dialoguer::Password;
use keystone_client::models::v2::{CreateUserParams, UpdateUserParams, User};
use keystone_client::{ClientError, KeystoneClient};
use keystone_config::Config;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::parse_enabled;
use crate::commands::tenants::find_tenant;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        /// Only users of this tenant (name or id)
        #[arg(long, alias = "tenant-id")]
        tenant: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        marker: Option<String>,
    },
    /// Show a user
    Show {
        /// User name or id
        user: String,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        /// Initial password
        #[arg(long)]
        pass: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Default tenant (name or id)
        #[arg(long, alias = "tenant-id")]
        tenant: Option<String>,
        #[arg(long, default_value = "true", action = clap::ArgAction::Set, value_parser = parse_enabled)]
        enabled: bool,
    },
    /// Update a user's name, email or enabled flag
    Update {
        /// User name or id
        user: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Change a user's password
    PasswordUpdate {
        /// User name or id
        user: String,
        /// New password; prompted for when omitted
        #[arg(long)]
        pass: Option<String>,
    },
    /// Change a user's default tenant
    TenantUpdate {
        /// User name or id
        user: String,
        /// Tenant name or id
        #[arg(long)]
        tenant: String,
    },
    /// Delete a user
    Delete {
        /// User name or id
        user: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// List a user's roles
    Roles {
        /// User name or id
        user: String,
        /// Only roles on this tenant (name or id)
        #[arg(long)]
        tenant: Option<String>,
    },
}

pub async fn run(
    config: Config,
    command: UsersCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        UsersCommand::List {
            tenant,
            limit,
            marker,
        } => run_list(config, tenant.as_deref(), limit, marker.as_deref(), format, cancel).await,
        UsersCommand::Show { user } => run_show(config, &user, format, cancel).await,
        UsersCommand::Create {
            name,
            pass,
            email,
            tenant,
            enabled,
        } => {
            run_create(
                config,
                name,
                pass.map(SecretString::from),
                email,
                tenant.as_deref(),
                enabled,
                format,
                cancel,
            )
            .await
        }
        UsersCommand::Update {
            user,
            name,
            email,
            enabled,
        } => run_update(config, &user, UpdateUserParams { name, email }, enabled, format, cancel).await,
        UsersCommand::PasswordUpdate { user, pass } => {
            let password = match pass {
                Some(pass) => SecretString::from(pass),
                None => prompt_new_password()?,
            };
            run_password_update(config, &user, password, cancel).await
        }
        UsersCommand::TenantUpdate { user, tenant } => {
            run_tenant_update(config, &user, &tenant, cancel).await
        }
        UsersCommand::Delete { user, force } => run_delete(config, &user, force, cancel).await,
        UsersCommand::Roles { user, tenant } => {
            run_roles(config, &user, tenant.as_deref(), format, cancel).await
        }
    }
}

fn prompt_new_password() -> Result<SecretString> {
    let password = Password::new()
        .with_prompt("New Password")
        .with_confirmation("Repeat New Password", "Passwords do not match.")
        .interact()?;
    Ok(SecretString::from(password))
}

/// Look a user up by id, falling back to a name match.
pub(crate) async fn find_user(
    client: &mut KeystoneClient,
    name_or_id: &str,
    cancel: &CancellationToken,
) -> Result<User> {
    match cancellable!(client.get_user(name_or_id), cancel) {
        Ok(user) => Ok(user),
        Err(e)
            if e.downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_not_found) =>
        {
            let users = cancellable!(client.list_users(None, None, None), cancel)?;
            users
                .into_iter()
                .find(|user| user.name.as_deref() == Some(name_or_id))
                .ok_or(e)
        }
        Err(e) => Err(e),
    }
}

async fn run_list(
    config: Config,
    tenant: Option<&str>,
    limit: Option<usize>,
    marker: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Listing users");

    let mut client = crate::commands::build_client(&config)?;
    let tenant_id = match tenant {
        Some(tenant) => Some(find_tenant(&mut client, tenant, cancel).await?.id),
        None => None,
    };
    let users = cancellable!(
        client.list_users(tenant_id.as_deref(), limit, marker),
        cancel
    )?;

    output_result(&format_list(&users, format)?);
    Ok(())
}

async fn run_show(
    config: Config,
    user: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Showing user: {}", user);

    let mut client = crate::commands::build_client(&config)?;
    let user = find_user(&mut client, user, cancel).await?;

    output_result(&format_item(&user, format)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_create(
    config: Config,
    name: String,
    password: Option<SecretString>,
    email: Option<String>,
    tenant: Option<&str>,
    enabled: bool,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Creating user: {}", name);

    let mut client = crate::commands::build_client(&config)?;
    let tenant_id = match tenant {
        Some(tenant) => Some(find_tenant(&mut client, tenant, cancel).await?.id),
        None => None,
    };
    let params = CreateUserParams {
        name,
        password,
        email,
        tenant_id,
        enabled,
    };
    let user = cancellable!(client.create_user(&params), cancel)?;

    output_result(&format_item(&user, format)?);
    Ok(())
}

async fn run_update(
    config: Config,
    user: &str,
    params: UpdateUserParams,
    enabled: Option<bool>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    if params.name.is_none() && params.email.is_none() && enabled.is_none() {
        bail!("User not updated, no arguments present.");
    }

    info!("Updating user: {}", user);

    let mut client = crate::commands::build_client(&config)?;
    let mut current = find_user(&mut client, user, cancel).await?;

    if params.name.is_some() || params.email.is_some() {
        current = cancellable!(client.update_user(&current.id, &params), cancel)?;
    }
    if let Some(enabled) = enabled {
        current = cancellable!(client.update_user_enabled(&current.id, enabled), cancel)?;
    }

    output_result(&format_item(&current, format)?);
    Ok(())
}

async fn run_password_update(
    config: Config,
    user: &str,
    password: SecretString,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Updating password of user: {}", user);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_user(&mut client, user, cancel).await?;
    cancellable!(
        client.update_user_password(&current.id, password.expose_secret()),
        cancel
    )?;

    println!("Password of user '{}' updated.", user);
    Ok(())
}

async fn run_tenant_update(
    config: Config,
    user: &str,
    tenant: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Moving user {} to tenant {}", user, tenant);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_user(&mut client, user, cancel).await?;
    let tenant = find_tenant(&mut client, tenant, cancel).await?;
    cancellable!(client.update_user_tenant(&current.id, &tenant.id), cancel)?;

    println!("Default tenant of user '{}' set to '{}'.", user, tenant.name);
    Ok(())
}

async fn run_delete(
    config: Config,
    user: &str,
    force: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !crate::interactive::confirmed(force, user, "user")? {
        return Ok(());
    }

    info!("Deleting user: {}", user);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_user(&mut client, user, cancel).await?;
    cancellable!(client.delete_user(&current.id), cancel)?;

    println!("User '{}' deleted successfully.", user);
    Ok(())
}

async fn run_roles(
    config: Config,
    user: &str,
    tenant: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Listing roles of user: {}", user);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_user(&mut client, user, cancel).await?;
    let tenant_id = match tenant {
        Some(tenant) => Some(find_tenant(&mut client, tenant, cancel).await?.id),
        None => None,
    };
    let roles = cancellable!(
        client.list_user_roles(&current.id, tenant_id.as_deref()),
        cancel
    )?;

    output_result(&format_list(&roles, format)?);
    Ok(())
}
