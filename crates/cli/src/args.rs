//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map global `--os-*` flags onto the configuration loader.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `OS_*` environment variables (see `keystone_config`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use keystone_config::{ConfigLoader, IdentityApiVersion};
use std::path::PathBuf;
use std::time::Duration;

use crate::commands;

#[derive(Parser)]
#[command(name = "keystone")]
#[command(about = "Command-line interface to the OpenStack Identity API", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  keystone --os-auth-url http://keystone:5000/v2.0 --os-username admin --os-password secret tenants list\n  keystone --os-token ADMIN --os-endpoint http://keystone:35357/v2.0 users list\n  keystone --os-identity-api-version 3 projects list --domain-id default\n  keystone bootstrap --pass secret\n"
)]
pub struct Cli {
    /// Identity service endpoint used to obtain tokens
    #[arg(long, global = true, value_name = "AUTH_URL")]
    pub os_auth_url: Option<String>,

    #[arg(long, global = true, value_name = "USERNAME")]
    pub os_username: Option<String>,

    #[arg(long, global = true, value_name = "USER_ID")]
    pub os_user_id: Option<String>,

    #[arg(long, global = true, value_name = "PASSWORD")]
    pub os_password: Option<String>,

    /// Tenant (v3: project) name to scope the token to
    #[arg(long, global = true, alias = "os-project-name", value_name = "TENANT_NAME")]
    pub os_tenant_name: Option<String>,

    /// Tenant (v3: project) id to scope the token to
    #[arg(long, global = true, alias = "os-project-id", value_name = "TENANT_ID")]
    pub os_tenant_id: Option<String>,

    #[arg(long, global = true, value_name = "USER_DOMAIN_ID")]
    pub os_user_domain_id: Option<String>,

    #[arg(long, global = true, value_name = "USER_DOMAIN_NAME")]
    pub os_user_domain_name: Option<String>,

    #[arg(long, global = true, value_name = "PROJECT_DOMAIN_ID")]
    pub os_project_domain_id: Option<String>,

    #[arg(long, global = true, value_name = "PROJECT_DOMAIN_NAME")]
    pub os_project_domain_name: Option<String>,

    /// Domain to scope a v3 token to
    #[arg(long, global = true, value_name = "DOMAIN_ID")]
    pub os_domain_id: Option<String>,

    #[arg(long, global = true, value_name = "DOMAIN_NAME")]
    pub os_domain_name: Option<String>,

    /// Pre-issued token, used with --os-endpoint to bypass authentication
    #[arg(long, global = true, alias = "os-service-token", value_name = "TOKEN")]
    pub os_token: Option<String>,

    /// Management endpoint, used with --os-token
    #[arg(long, global = true, alias = "os-service-endpoint", value_name = "ENDPOINT")]
    pub os_endpoint: Option<String>,

    #[arg(long, global = true, value_name = "REGION_NAME")]
    pub os_region_name: Option<String>,

    /// Identity API version (2.0 or 3)
    #[arg(long, global = true, value_name = "VERSION")]
    pub os_identity_api_version: Option<IdentityApiVersion>,

    /// CA bundle used to verify the server certificate
    #[arg(long, global = true, value_name = "FILE")]
    pub os_cacert: Option<PathBuf>,

    /// Client certificate (PEM), requires --os-key
    #[arg(long, global = true, value_name = "FILE")]
    pub os_cert: Option<PathBuf>,

    /// Client private key (PEM), requires --os-cert
    #[arg(long, global = true, value_name = "FILE")]
    pub os_key: Option<PathBuf>,

    /// Cache tokens in the OS keyring
    #[arg(long, global = true)]
    pub os_cache: bool,

    /// Ignore any cached token and store the newly issued one
    #[arg(long, global = true)]
    pub force_new_token: bool,

    /// Seconds before expiry at which a token counts as stale
    #[arg(long, global = true, value_name = "SECONDS")]
    pub stale_duration: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Log requests and responses to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply explicit flags on top of `loader`; flags win over the environment.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        macro_rules! apply {
            ($field:ident => $setter:ident) => {
                if let Some(value) = &self.$field {
                    loader = loader.$setter(value.clone());
                }
            };
        }

        apply!(os_auth_url => with_auth_url);
        apply!(os_username => with_username);
        apply!(os_user_id => with_user_id);
        apply!(os_password => with_password);
        apply!(os_tenant_name => with_project_name);
        apply!(os_tenant_id => with_project_id);
        apply!(os_user_domain_id => with_user_domain_id);
        apply!(os_user_domain_name => with_user_domain_name);
        apply!(os_project_domain_id => with_project_domain_id);
        apply!(os_project_domain_name => with_project_domain_name);
        apply!(os_domain_id => with_domain_id);
        apply!(os_domain_name => with_domain_name);
        apply!(os_token => with_token);
        apply!(os_endpoint => with_endpoint);
        apply!(os_region_name => with_region_name);
        apply!(os_cacert => with_cacert);
        apply!(os_cert => with_cert);
        apply!(os_key => with_key);

        if let Some(version) = self.os_identity_api_version {
            loader = loader.with_identity_api_version(version);
        }
        if let Some(secs) = self.timeout {
            loader = loader.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.stale_duration {
            loader = loader.with_stale_duration(Duration::from_secs(secs));
        }
        if self.os_cache {
            loader = loader.with_use_keyring(true);
        }
        if self.force_new_token {
            loader = loader.with_force_new_token(true);
        }
        if self.insecure {
            loader = loader.with_insecure(true);
        }
        Ok(loader)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage tenants (v2)
    Tenants {
        #[command(subcommand)]
        command: commands::tenants::TenantsCommand,
    },

    /// Manage users (v2)
    Users {
        #[command(subcommand)]
        command: commands::users::UsersCommand,
    },

    /// Manage roles and role grants (v2)
    Roles {
        #[command(subcommand)]
        command: commands::roles::RolesCommand,
    },

    /// Manage the service registry (v2)
    Services {
        #[command(subcommand)]
        command: commands::services::ServicesCommand,
    },

    /// Manage service endpoints (v2)
    Endpoints {
        #[command(subcommand)]
        command: commands::endpoints::EndpointsCommand,
    },

    /// Issue, validate and revoke tokens
    Tokens {
        #[command(subcommand)]
        command: commands::tokens::TokensCommand,
    },

    /// Show the service catalog of the current token
    Catalog {
        /// Only show services of this type
        #[arg(long, value_name = "SERVICE_TYPE")]
        service: Option<String>,
    },

    /// Manage projects (v3)
    Projects {
        #[command(subcommand)]
        command: commands::projects::ProjectsCommand,
    },

    /// Manage domains (v3)
    Domains {
        #[command(subcommand)]
        command: commands::domains::DomainsCommand,
    },

    /// Manage groups and group membership (v3)
    Groups {
        #[command(subcommand)]
        command: commands::groups::GroupsCommand,
    },

    /// Manage policies (v3)
    Policies {
        #[command(subcommand)]
        command: commands::policies::PoliciesCommand,
    },

    /// Manage credentials (v3)
    Credentials {
        #[command(subcommand)]
        command: commands::credentials::CredentialsCommand,
    },

    /// Create a tenant, role and user, grant the role, and verify by logging in
    Bootstrap(commands::bootstrap::BootstrapArgs),
}
