//! Credential command implementation (v3).

use anyhow::Result;
use clap::Subcommand;
use keystone_client::models::v3::CredentialParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum CredentialsCommand {
    /// List credentials
    List {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Show a credential
    Show { id: String },
    /// Store a credential for a user
    Create {
        #[arg(long)]
        user_id: String,
        /// Credential type, e.g. ec2
        #[arg(long = "type")]
        credential_type: String,
        /// Opaque credential data
        #[arg(long)]
        blob: String,
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Update a credential
    Update {
        id: String,
        #[arg(long)]
        blob: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Delete a credential
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: CredentialsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut client = crate::commands::build_client(&config)?;
    let mut v3 = client.v3();

    match command {
        CredentialsCommand::List { user_id } => {
            info!("Listing credentials");
            let query = [("user_id", user_id.as_deref())];
            let credentials = cancellable!(v3.list_credentials(&query), cancel)?;
            output_result(&format_list(&credentials, format)?);
        }
        CredentialsCommand::Show { id } => {
            info!("Showing credential: {}", id);
            let credential = cancellable!(v3.get_credential(&id), cancel)?;
            output_result(&format_item(&credential, format)?);
        }
        CredentialsCommand::Create {
            user_id,
            credential_type,
            blob,
            project_id,
        } => {
            info!("Creating {} credential for user {}", credential_type, user_id);
            let params = CredentialParams {
                user_id: Some(user_id),
                project_id,
                credential_type: Some(credential_type),
                blob: Some(blob),
            };
            let credential = cancellable!(v3.create_credential(&params), cancel)?;
            output_result(&format_item(&credential, format)?);
        }
        CredentialsCommand::Update {
            id,
            blob,
            project_id,
        } => {
            info!("Updating credential: {}", id);
            let params = CredentialParams {
                blob,
                project_id,
                ..Default::default()
            };
            let credential = cancellable!(v3.update_credential(&id, &params), cancel)?;
            output_result(&format_item(&credential, format)?);
        }
        CredentialsCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "credential")? {
                return Ok(());
            }
            info!("Deleting credential: {}", id);
            cancellable!(v3.delete_credential(&id), cancel)?;
            println!("Credential '{}' deleted successfully.", id);
        }
    }
    Ok(())
}
