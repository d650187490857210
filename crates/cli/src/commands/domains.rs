//! Domain command implementation (v3).

use anyhow::Result;
use clap::Subcommand;
use keystone_client::GrantTarget;
use keystone_client::models::v3::DomainParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{GrantArgs, parse_enabled, run_role_change};
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List domains
    List {
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a domain
    Show { id: String },
    /// Create a domain
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Update a domain
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// A domain must be disabled before it can be deleted
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Delete a domain
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Grant a role on a domain
    Grant {
        /// Domain id
        id: String,
        #[command(flatten)]
        grant: GrantArgs,
    },
    /// Revoke a role on a domain
    Revoke {
        /// Domain id
        id: String,
        #[command(flatten)]
        grant: GrantArgs,
    },
}

pub async fn run(
    config: Config,
    command: DomainsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        DomainsCommand::List { name } => {
            info!("Listing domains");
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let query = [("name", name.as_deref())];
            let domains = cancellable!(v3.list_domains(&query), cancel)?;
            output_result(&format_list(&domains, format)?);
        }
        DomainsCommand::Show { id } => {
            info!("Showing domain: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let domain = cancellable!(v3.get_domain(&id), cancel)?;
            output_result(&format_item(&domain, format)?);
        }
        DomainsCommand::Create {
            name,
            description,
            enabled,
        } => {
            info!("Creating domain: {}", name);
            let params = DomainParams {
                name: Some(name),
                description,
                enabled,
            };
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let domain = cancellable!(v3.create_domain(&params), cancel)?;
            output_result(&format_item(&domain, format)?);
        }
        DomainsCommand::Update {
            id,
            name,
            description,
            enabled,
        } => {
            info!("Updating domain: {}", id);
            let params = DomainParams {
                name,
                description,
                enabled,
            };
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let domain = cancellable!(v3.update_domain(&id, &params), cancel)?;
            output_result(&format_item(&domain, format)?);
        }
        DomainsCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "domain")? {
                return Ok(());
            }
            info!("Deleting domain: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            cancellable!(v3.delete_domain(&id), cancel)?;
            println!("Domain '{}' deleted successfully.", id);
        }
        DomainsCommand::Grant { id, grant } => {
            run_role_change(config, GrantTarget::Domain(&id), grant, true, cancel).await?;
        }
        DomainsCommand::Revoke { id, grant } => {
            run_role_change(config, GrantTarget::Domain(&id), grant, false, cancel).await?;
        }
    }
    Ok(())
}
