//! Endpoint command implementation (v2).
//!
//! Endpoints belong to a registered service; see the services module.

use anyhow::Result;
use clap::Subcommand;
use keystone_client::models::v2::CreateEndpointParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum EndpointsCommand {
    /// List endpoints
    List,
    /// Create an endpoint for a service
    Create {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        service_id: String,
        #[arg(long)]
        publicurl: String,
        #[arg(long)]
        adminurl: Option<String>,
        #[arg(long)]
        internalurl: Option<String>,
    },
    /// Delete an endpoint
    Delete {
        /// Endpoint id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: EndpointsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        EndpointsCommand::List => {
            info!("Listing endpoints");
            let mut client = crate::commands::build_client(&config)?;
            let endpoints = cancellable!(client.list_endpoints(), cancel)?;
            output_result(&format_list(&endpoints, format)?);
        }
        EndpointsCommand::Create {
            region,
            service_id,
            publicurl,
            adminurl,
            internalurl,
        } => {
            info!("Creating endpoint for service: {}", service_id);
            let mut client = crate::commands::build_client(&config)?;
            let params = CreateEndpointParams {
                region,
                service_id,
                publicurl,
                adminurl,
                internalurl,
            };
            let endpoint = cancellable!(client.create_endpoint(&params), cancel)?;
            output_result(&format_item(&endpoint, format)?);
        }
        EndpointsCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "endpoint")? {
                return Ok(());
            }
            info!("Deleting endpoint: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            cancellable!(client.delete_endpoint(&id), cancel)?;
            println!("Endpoint '{}' deleted successfully.", id);
        }
    }
    Ok(())
}
