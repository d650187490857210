//! Policy command implementation (v3).
//!
//! Policy blobs are stored and returned verbatim; the service never interprets them.

use anyhow::{Context, Result};
use clap::Subcommand;
use keystone_client::models::v3::PolicyParams;
use keystone_config::Config;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum PoliciesCommand {
    /// List policies
    List {
        /// Only policies of this MIME type
        #[arg(long = "type")]
        policy_type: Option<String>,
    },
    /// Show a policy
    Show { id: String },
    /// Create a policy from a file
    Create {
        /// File holding the policy blob
        file: PathBuf,
        /// MIME type of the blob
        #[arg(long = "type", default_value = "application/json")]
        policy_type: String,
    },
    /// Replace a policy's blob or type
    Update {
        id: String,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long = "type")]
        policy_type: Option<String>,
    },
    /// Delete a policy
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

fn read_blob(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file {}", path.display()))
}

pub async fn run(
    config: Config,
    command: PoliciesCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        PoliciesCommand::List { policy_type } => {
            info!("Listing policies");
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let query = [("type", policy_type.as_deref())];
            let policies = cancellable!(v3.list_policies(&query), cancel)?;
            output_result(&format_list(&policies, format)?);
        }
        PoliciesCommand::Show { id } => {
            info!("Showing policy: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let policy = cancellable!(v3.get_policy(&id), cancel)?;
            output_result(&format_item(&policy, format)?);
        }
        PoliciesCommand::Create { file, policy_type } => {
            let params = PolicyParams {
                policy_type: Some(policy_type),
                blob: Some(read_blob(&file)?),
            };
            info!("Creating policy from {}", file.display());
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let policy = cancellable!(v3.create_policy(&params), cancel)?;
            output_result(&format_item(&policy, format)?);
        }
        PoliciesCommand::Update {
            id,
            file,
            policy_type,
        } => {
            let params = PolicyParams {
                policy_type,
                blob: file.as_deref().map(read_blob).transpose()?,
            };
            info!("Updating policy: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let policy = cancellable!(v3.update_policy(&id, &params), cancel)?;
            output_result(&format_item(&policy, format)?);
        }
        PoliciesCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "policy")? {
                return Ok(());
            }
            info!("Deleting policy: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            cancellable!(v3.delete_policy(&id), cancel)?;
            println!("Policy '{}' deleted successfully.", id);
        }
    }
    Ok(())
}
