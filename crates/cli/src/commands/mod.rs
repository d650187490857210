//! CLI command implementations.
//!
//! Every handler follows the same shape: log the intent, build a client from
//! the resolved [`Config`], race the call against the cancellation token,
//! then format and print the result.

pub mod bootstrap;
pub mod catalog;
pub mod credentials;
pub mod domains;
pub mod endpoints;
pub mod groups;
pub mod policies;
pub mod projects;
pub mod roles;
pub mod services;
pub mod tenants;
pub mod tokens;
pub mod users;

use anyhow::{Context, Result};
use keystone_client::{GrantActor, GrantTarget, KeystoneClient};
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;

/// Build a client for one command invocation.
pub fn build_client(config: &Config) -> Result<KeystoneClient> {
    KeystoneClient::builder()
        .from_config(config)
        .build()
        .context("Failed to create identity client")
}

/// Parse a `true`/`false` flag value the way the admin API spells booleans.
pub fn parse_enabled(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

/// Holder and role of a v3 grant.
#[derive(Debug, clap::Args)]
pub struct GrantArgs {
    /// User id receiving the role
    #[arg(long, conflicts_with = "group", required_unless_present = "group")]
    pub user: Option<String>,
    /// Group id receiving the role
    #[arg(long)]
    pub group: Option<String>,
    /// Role id
    #[arg(long)]
    pub role: String,
}

impl GrantArgs {
    fn actor(&self) -> Option<GrantActor<'_>> {
        match (&self.user, &self.group) {
            (Some(user), _) => Some(GrantActor::User(user)),
            (None, Some(group)) => Some(GrantActor::Group(group)),
            (None, None) => None,
        }
    }
}

/// Grant (or revoke) a role on a v3 project or domain.
pub async fn run_role_change(
    config: Config,
    target: GrantTarget<'_>,
    args: GrantArgs,
    grant: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let Some(actor) = args.actor() else {
        anyhow::bail!("Either --user or --group is required.");
    };

    info!(grant, ?target, ?actor, "Changing role {}", args.role);

    let mut client = build_client(&config)?;
    let mut v3 = client.v3();
    if grant {
        cancellable!(v3.grant_role(target, actor, &args.role), cancel)?;
        println!("Role '{}' granted.", args.role);
    } else {
        cancellable!(v3.revoke_role(target, actor, &args.role), cancel)?;
        println!("Role '{}' revoked.", args.role);
    }
    Ok(())
}
