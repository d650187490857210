//! Service registry command implementation (v2, `OS-KSADM`).

use anyhow::Result;
use clap::Subcommand;
use keystone_client::models::v2::CreateServiceParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List registered services
    List,
    /// Show a service
    Show {
        /// Service id
        id: String,
    },
    /// Register a service
    Create {
        #[arg(long)]
        name: String,
        /// Service type, e.g. identity or compute
        #[arg(long = "type")]
        service_type: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a service
    Delete {
        /// Service id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: ServicesCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ServicesCommand::List => {
            info!("Listing services");
            let mut client = crate::commands::build_client(&config)?;
            let services = cancellable!(client.list_services(), cancel)?;
            output_result(&format_list(&services, format)?);
        }
        ServicesCommand::Show { id } => {
            info!("Showing service: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let service = cancellable!(client.get_service(&id), cancel)?;
            output_result(&format_item(&service, format)?);
        }
        ServicesCommand::Create {
            name,
            service_type,
            description,
        } => {
            info!("Creating service: {} ({})", name, service_type);
            let mut client = crate::commands::build_client(&config)?;
            let params = CreateServiceParams {
                name,
                service_type,
                description,
            };
            let service = cancellable!(client.create_service(&params), cancel)?;
            output_result(&format_item(&service, format)?);
        }
        ServicesCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "service")? {
                return Ok(());
            }
            info!("Deleting service: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            cancellable!(client.delete_service(&id), cancel)?;
            println!("Service '{}' deleted successfully.", id);
        }
    }
    Ok(())
}
