//! Bootstrap command implementation.
//!
//! Responsibilities:
//! - Seed a fresh identity service with an admin tenant, role and user.
//! - Grant the role and prove the result by logging in as the new user.
//!
//! Does NOT handle:
//! - Registering services or endpoints (see services and endpoints modules).
//!
//! Invariants:
//! - The verification login always uses v2 password authentication and
//!   never touches the token cache.

use anyhow::{Context, Result};
use clap::Args;
use keystone_client::models::v2::{CreateUserParams, TenantParams};
use keystone_client::{AuthParameters, KeystoneClient, PASSWORD_V2};
use keystone_config::{Config, IdentityApiVersion};
use secrecy::SecretString;
use tracing::info;

use crate::cancellation::CancellationToken;

#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Name of the user to create
    #[arg(long, default_value = "admin")]
    pub user_name: String,
    /// Password of the new user
    #[arg(long)]
    pub pass: String,
    /// Name of the role to create and grant
    #[arg(long, default_value = "admin")]
    pub role_name: String,
    /// Name of the tenant to create
    #[arg(long, default_value = "admin")]
    pub tenant_name: String,
}

pub async fn run(config: Config, args: BootstrapArgs, cancel: &CancellationToken) -> Result<()> {
    info!(
        "Bootstrapping tenant {}, role {}, user {}",
        args.tenant_name, args.role_name, args.user_name
    );

    let password = SecretString::from(args.pass);
    let mut client = crate::commands::build_client(&config)?;

    let tenant_params = TenantParams {
        name: Some(args.tenant_name.clone()),
        description: None,
        enabled: Some(true),
    };
    let tenant = cancellable!(client.create_tenant(&tenant_params), cancel)?;
    let role = cancellable!(client.create_role(&args.role_name), cancel)?;
    let user_params = CreateUserParams {
        name: args.user_name.clone(),
        password: Some(password.clone()),
        email: None,
        tenant_id: Some(tenant.id.clone()),
        enabled: true,
    };
    let user = cancellable!(client.create_user(&user_params), cancel)?;
    cancellable!(
        client.add_tenant_user_role(&tenant.id, &user.id, &role.id),
        cancel
    )?;

    let auth_url = config
        .connection
        .auth_url
        .clone()
        .or_else(|| config.connection.endpoint.clone())
        .context("An auth URL or endpoint is required to verify the new user")?;
    let params = AuthParameters {
        auth_url: Some(auth_url),
        username: Some(args.user_name.clone()),
        password: Some(password),
        project_name: Some(args.tenant_name.clone()),
        ..Default::default()
    };
    let mut verify = KeystoneClient::builder()
        .from_config(&config)
        .auth_parameters(params)
        .identity_api_version(IdentityApiVersion::V2)
        .auth_system(PASSWORD_V2)
        .use_keyring(false)
        .force_new_token(true)
        .build()
        .context("Failed to create identity client")?;
    cancellable!(verify.authenticate(AuthParameters::default()), cancel)
        .context("Bootstrapped user could not authenticate")?;

    println!(
        "Bootstrapped user '{}' with role '{}' on tenant '{}'.",
        user.name.as_deref().unwrap_or(&args.user_name),
        role.name,
        tenant.name
    );
    Ok(())
}
