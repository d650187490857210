//! Project command implementation (v3).
//!
//! Responsibilities:
//! - List, show, create, update and delete projects.
//! - Grant and revoke roles for users or groups on a project.
//!
//! Invariants:
//! - Resources are addressed by id; v3 names are only unique within a domain.

use anyhow::Result;
use clap::Subcommand;
use keystone_client::GrantTarget;
use keystone_client::models::v3::ProjectParams;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{GrantArgs, parse_enabled, run_role_change};
use crate::formatters::{OutputFormat, format_item, format_list, output_result};

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    List {
        #[arg(long)]
        domain_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a project
    Show { id: String },
    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        domain_id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Update a project
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_enabled)]
        enabled: Option<bool>,
    },
    /// Delete a project
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Grant a role on a project
    Grant {
        /// Project id
        id: String,
        #[command(flatten)]
        grant: GrantArgs,
    },
    /// Revoke a role on a project
    Revoke {
        /// Project id
        id: String,
        #[command(flatten)]
        grant: GrantArgs,
    },
}

pub async fn run(
    config: Config,
    command: ProjectsCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ProjectsCommand::List { domain_id, name } => {
            info!("Listing projects");
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let query = [
                ("domain_id", domain_id.as_deref()),
                ("name", name.as_deref()),
            ];
            let projects = cancellable!(v3.list_projects(&query), cancel)?;
            output_result(&format_list(&projects, format)?);
        }
        ProjectsCommand::Show { id } => {
            info!("Showing project: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let project = cancellable!(v3.get_project(&id), cancel)?;
            output_result(&format_item(&project, format)?);
        }
        ProjectsCommand::Create {
            name,
            domain_id,
            description,
            enabled,
        } => {
            info!("Creating project: {}", name);
            let params = ProjectParams {
                name: Some(name),
                domain_id,
                description,
                enabled,
            };
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let project = cancellable!(v3.create_project(&params), cancel)?;
            output_result(&format_item(&project, format)?);
        }
        ProjectsCommand::Update {
            id,
            name,
            description,
            enabled,
        } => {
            info!("Updating project: {}", id);
            let params = ProjectParams {
                name,
                description,
                enabled,
                ..Default::default()
            };
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            let project = cancellable!(v3.update_project(&id, &params), cancel)?;
            output_result(&format_item(&project, format)?);
        }
        ProjectsCommand::Delete { id, force } => {
            if !crate::interactive::confirmed(force, &id, "project")? {
                return Ok(());
            }
            info!("Deleting project: {}", id);
            let mut client = crate::commands::build_client(&config)?;
            let mut v3 = client.v3();
            cancellable!(v3.delete_project(&id), cancel)?;
            println!("Project '{}' deleted successfully.", id);
        }
        ProjectsCommand::Grant { id, grant } => {
            run_role_change(config, GrantTarget::Project(&id), grant, true, cancel).await?;
        }
        ProjectsCommand::Revoke { id, grant } => {
            run_role_change(config, GrantTarget::Project(&id), grant, false, cancel).await?;
        }
    }
    Ok(())
}
