//! Token command implementation.
//!
//! Responsibilities:
//! - Issue a token with the configured credentials and show what it grants.
//! - Validate or revoke another token with admin rights.
//!
//! Invariants:
//! - `get` needs credentials; a pre-issued `--os-token` has no access record to show.

use anyhow::{Result, bail};
use clap::Subcommand;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, TokenSummary, format_item, output_result};

#[derive(Debug, Subcommand)]
pub enum TokensCommand {
    /// Authenticate and show the issued token
    Get,
    /// Validate a token and show its owner and scope
    Validate {
        /// Token id
        token: String,
    },
    /// Revoke a token
    Revoke {
        /// Token id
        token: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: TokensCommand,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        TokensCommand::Get => run_get(config, format, cancel).await,
        TokensCommand::Validate { token } => run_validate(config, &token, format, cancel).await,
        TokensCommand::Revoke { token, force } => run_revoke(config, &token, force, cancel).await,
    }
}

async fn run_get(config: Config, format: OutputFormat, cancel: &CancellationToken) -> Result<()> {
    info!("Issuing token");

    let mut client = crate::commands::build_client(&config)?;
    let token = cancellable!(client.auth_token(), cancel)?;
    let Some(access) = client.access_info() else {
        bail!("No token was issued: a pre-issued token is in use.");
    };

    output_result(&format_item(&TokenSummary::new(token, access), format)?);
    Ok(())
}

async fn run_validate(
    config: Config,
    token: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Validating token");

    let mut client = crate::commands::build_client(&config)?;
    let access = cancellable!(client.validate_token(token), cancel)?;

    output_result(&format_item(&TokenSummary::new(token, &access), format)?);
    Ok(())
}

async fn run_revoke(
    config: Config,
    token: &str,
    force: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !crate::interactive::confirmed(force, token, "token")? {
        return Ok(());
    }

    info!("Revoking token");

    let mut client = crate::commands::build_client(&config)?;
    cancellable!(client.delete_token(token), cancel)?;

    println!("Token revoked.");
    Ok(())
}
