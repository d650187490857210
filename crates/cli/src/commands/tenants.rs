//! Tenant command implementation (v2).
//!
//! Responsibilities:
//! - List, show, create, update and delete tenants.
//! - Resolve tenants given by name or id.
//!
//! Does NOT handle:
//! - Role grants on tenants (see roles module).
//!
//! Invariants:
//! - Delete operations require confirmation unless --force is used.
//! - Update sends only the fields given on the command line.

use anyhow::{Result, bail};
use clap::Subcommand;
use keystone_client::models::v2::{Tenant, TenantParams};
use keystone_client::{ClientError, KeystoneClient};
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::parse_enabled;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum TenantsCommand {
    /// List tenants
    List {
        /// Maximum number of tenants to return
        #[arg(long)]
        limit: Option<usize>,
        /// Id of the last tenant of the previous page
        #[arg(long)]
        marker: Option<String>,
    },
    /// Show a tenant
    Show {
        /// Tenant name or id
        tenant: String,
    },
    /// Create a tenant
    Create {
        /// New tenant name
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Initial state
        #[arg(long, default_value = "true", action = clap::ArgAction::Set, value_parser = parse_enabled)]
        enabled: bool,
    },
    /// Update a tenant
    Update {
        /// Tenant name or id
        tenant: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Delete a tenant
    Delete {
        /// Tenant name or id
        tenant: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: TenantsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        TenantsCommand::List { limit, marker } => {
            run_list(config, limit, marker.as_deref(), format, cancel).await
        }
        TenantsCommand::Show { tenant } => run_show(config, &tenant, format, cancel).await,
        TenantsCommand::Create {
            name,
            description,
            enabled,
        } => {
            let params = TenantParams {
                name: Some(name),
                description,
                enabled: Some(enabled),
            };
            run_create(config, params, format, cancel).await
        }
        TenantsCommand::Update {
            tenant,
            name,
            description,
            enabled,
        } => {
            let params = TenantParams {
                name,
                description,
                enabled,
            };
            run_update(config, &tenant, params, format, cancel).await
        }
        TenantsCommand::Delete { tenant, force } => {
            run_delete(config, &tenant, force, cancel).await
        }
    }
}

/// Look a tenant up by id, falling back to a name match.
pub(crate) async fn find_tenant(
    client: &mut KeystoneClient,
    name_or_id: &str,
    cancel: &CancellationToken,
) -> Result<Tenant> {
    match cancellable!(client.get_tenant(name_or_id), cancel) {
        Ok(tenant) => Ok(tenant),
        Err(e)
            if e.downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_not_found) =>
        {
            cancellable!(client.find_tenant_by_name(name_or_id), cancel)?.ok_or(e)
        }
        Err(e) => Err(e),
    }
}

async fn run_list(
    config: Config,
    limit: Option<usize>,
    marker: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Listing tenants");

    let mut client = crate::commands::build_client(&config)?;
    let tenants = cancellable!(client.list_tenants(limit, marker), cancel)?;

    output_result(&format_list(&tenants, format)?);
    Ok(())
}

async fn run_show(
    config: Config,
    tenant: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Showing tenant: {}", tenant);

    let mut client = crate::commands::build_client(&config)?;
    let tenant = find_tenant(&mut client, tenant, cancel).await?;

    output_result(&format_item(&tenant, format)?);
    Ok(())
}

async fn run_create(
    config: Config,
    params: TenantParams,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Creating tenant: {:?}", params.name);

    let mut client = crate::commands::build_client(&config)?;
    let tenant = cancellable!(client.create_tenant(&params), cancel)?;

    output_result(&format_item(&tenant, format)?);
    Ok(())
}

async fn run_update(
    config: Config,
    tenant: &str,
    params: TenantParams,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    if params.name.is_none() && params.description.is_none() && params.enabled.is_none() {
        bail!("Tenant not updated, no arguments present.");
    }

    info!("Updating tenant: {}", tenant);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_tenant(&mut client, tenant, cancel).await?;
    let updated = cancellable!(client.update_tenant(&current.id, &params), cancel)?;

    output_result(&format_item(&updated, format)?);
    Ok(())
}

async fn run_delete(
    config: Config,
    tenant: &str,
    force: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !crate::interactive::confirmed(force, tenant, "tenant")? {
        return Ok(());
    }

    info!("Deleting tenant: {}", tenant);

    let mut client = crate::commands::build_client(&config)?;
    let current = find_tenant(&mut client, tenant, cancel).await?;
    cancellable!(client.delete_tenant(&current.id), cancel)?;

    println!("Tenant '{}' deleted successfully.", current.name);
    Ok(())
}
