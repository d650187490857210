//! Integration tests for configuration loading through the public API.

use keystone_config::{ConfigError, ConfigLoader, IdentityApiVersion, env_var_or_none};
use secrecy::ExposeSecret;

#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_auth_url("http://keystone:5000/v3")
        .with_identity_api_version(IdentityApiVersion::V3)
        .with_username("admin")
        .with_password("secret".to_string())
        .with_user_domain_name("Default")
        .with_project_name("admin")
        .with_project_domain_name("Default")
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(
        config.connection.auth_url.as_deref(),
        Some("http://keystone:5000/v3")
    );
    assert_eq!(config.connection.identity_api_version, IdentityApiVersion::V3);
    assert!(config.auth.has_password_credentials());
    assert_eq!(config.auth.user_domain_name.as_deref(), Some("Default"));
}

#[test]
fn test_secrets_are_redacted_in_debug_output() {
    let config = ConfigLoader::new()
        .with_endpoint("http://keystone:35357/v2.0")
        .with_token("very-secret-token".to_string())
        .build()
        .unwrap();

    let debug = format!("{config:?}");
    assert!(!debug.contains("very-secret-token"));
    assert_eq!(
        config.auth.token.as_ref().map(|t| t.expose_secret()),
        Some("very-secret-token")
    );
}

#[test]
fn test_missing_auth_source_message_names_variables() {
    let err = ConfigLoader::new().build().unwrap_err();
    assert!(matches!(err, ConfigError::MissingAuthSource));
    assert!(err.to_string().contains("OS_AUTH_URL"));
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("OS_AUTH_URL");
}
