//! Group command implementation (v3).
//!
//! Responsibilities:
//! - List, show, create, update and delete groups.
//! - Add users to and remove users from a group.

use anyhow::Result;
use clap::Subcommand;
use keystone_client::models::v3::GroupParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
    List {
        #[arg(long)]
        domain_id: Option<String>,
        /// Only groups this user belongs to
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Show a group
    Show { id: String },
    /// Create a group
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        domain_id: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a group
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a group
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Add a user to a group
    AddUser {
        /// Group id
        id: String,
        #[arg(long)]
        user: String,
    },
    /// Remove a user from a group
    RemoveUser {
        /// Group id
        id: String,
        #[arg(long)]
        user: String,
    },
}

pub async fn run(
    config: Config,
    command: GroupsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut client = crate::commands::build_client(&config)?;
    let mut v3 = client.v3();

    match command {
        GroupsCommand::List { domain_id, user_id } => {
            info!("Listing groups");
            let query = [
                ("domain_id", domain_id.as_deref()),
                ("user_id", user_id.as_deref()),
            ];
            let groups = cancellable!(v3.list_groups(&query), cancel)?;
            output_result(&format_list(&groups, format)?);
        }
        GroupsCommand::Show { id } => {
            info!("Showing group: {}", id);
            let group = cancellable!(v3.get_group(&id), cancel)?;
            output_result(&format_item(&group, format)?);
        }
        GroupsCommand::Create {
            name,
            domain_id,
            description,
        } => {
            info!("Creating group: {}", name);
            let params = GroupParams {
                name: Some(name),
                domain_id,
                description,
            };
            let group = cancellable!(v3.create_group(&params), cancel)?;
            output_result(&format_item(&group, format)?);
        }
        GroupsCommand::Update {
            id,
            name,
            description,
        } => {
            info!("Updating group: {}", id);
            let params = GroupParams {
                name,
                description,
                ..Default::default()
            };
            let group = cancellable!(v3.update_group(&id, &params), cancel)?;
            output_result(&format_item(&group, format)?);
        }
        GroupsCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "group")? {
                return Ok(());
            }
            info!("Deleting group: {}", id);
            cancellable!(v3.delete_group(&id), cancel)?;
            println!("Group '{}' deleted successfully.", id);
        }
        GroupsCommand::AddUser { id, user } => {
            info!("Adding user {} to group {}", user, id);
            cancellable!(v3.add_user_to_group(&id, &user), cancel)?;
            println!("User '{}' added to group '{}'.", user, id);
        }
        GroupsCommand::RemoveUser { id, user } => {
            info!("Removing user {} from group {}", user, id);
            cancellable!(v3.remove_user_from_group(&id, &user), cancel)?;
            println!("User '{}' removed from group '{}'.", user, id);
        }
    }
    Ok(())
}
