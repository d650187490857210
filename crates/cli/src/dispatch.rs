//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Resolve the output format once for every command.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - All commands receive the same cancellation token.

use anyhow::Result;
use keystone_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::formatters::OutputFormat;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let format: OutputFormat = cli.output.parse()?;

    match cli.command {
        Commands::Tenants { command } => {
            commands::tenants::run(config, command, format, cancel_token).await
        }
        Commands::Users { command } => {
            commands::users::run(config, command, format, cancel_token).await
        }
        Commands::Roles { command } => {
            commands::roles::run(config, command, format, cancel_token).await
        }
        Commands::Services { command } => {
            commands::services::run(config, command, format, cancel_token).await
        }
        Commands::Endpoints { command } => {
            commands::endpoints::run(config, command, format, cancel_token).await
        }
        Commands::Tokens { command } => {
            commands::tokens::run(config, command, format, cancel_token).await
        }
        Commands::Catalog { service } => {
            commands::catalog::run(config, service.as_deref(), format, cancel_token).await
        }
        Commands::Projects { command } => {
            commands::projects::run(config, command, format, cancel_token).await
        }
        Commands::Domains { command } => {
            commands::domains::run(config, command, format, cancel_token).await
        }
        Commands::Groups { command } => {
            commands::groups::run(config, command, format, cancel_token).await
        }
        Commands::Policies { command } => {
            commands::policies::run(config, command, format, cancel_token).await
        }
        Commands::Credentials { command } => {
            commands::credentials::run(config, command, format, cancel_token).await
        }
        Commands::Bootstrap(args) => commands::bootstrap::run(config, args, cancel_token).await,
    }
}
