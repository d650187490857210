//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read the `OS_*` variables understood by OpenStack tooling.
//! - Apply them to a `ConfigLoader` without overriding explicit builder values.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - `OS_PROJECT_*` wins over the v2 spelling `OS_TENANT_*`.
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::IdentityApiVersion;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// First set variable among `keys`, in order.
fn first_env_var(keys: &[&str]) -> Option<String> {
    keys.iter().enumerate().find_map(|(i, key)| {
        let value = env_var_or_none(key)?;
        if i > 0 {
            tracing::debug!(var = key, preferred = keys[0], "Using fallback environment variable");
        }
        Some(value)
    })
}

pub(crate) fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

fn parse_secs(var: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be a whole number of seconds".to_string(),
        })
}

/// Apply environment variable configuration to the loader.
///
/// Values already set through builder methods are kept.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let fields = loader.fields_mut();

    macro_rules! fill {
        ($field:expr, $($key:literal),+) => {
            if $field.is_none() {
                $field = first_env_var(&[$($key),+]);
            }
        };
    }

    fill!(fields.auth_url, "OS_AUTH_URL");
    fill!(fields.endpoint, "OS_SERVICE_ENDPOINT");
    fill!(fields.region_name, "OS_REGION_NAME");
    fill!(fields.original_ip, "OS_ORIGINAL_IP");
    fill!(fields.username, "OS_USERNAME");
    fill!(fields.user_id, "OS_USER_ID");
    fill!(fields.project_id, "OS_PROJECT_ID", "OS_TENANT_ID");
    fill!(fields.project_name, "OS_PROJECT_NAME", "OS_TENANT_NAME");
    fill!(fields.project_domain_id, "OS_PROJECT_DOMAIN_ID");
    fill!(fields.project_domain_name, "OS_PROJECT_DOMAIN_NAME");
    fill!(fields.user_domain_id, "OS_USER_DOMAIN_ID");
    fill!(fields.user_domain_name, "OS_USER_DOMAIN_NAME");
    fill!(fields.domain_id, "OS_DOMAIN_ID");
    fill!(fields.domain_name, "OS_DOMAIN_NAME");

    if fields.password.is_none() {
        fields.password = env_var_or_none("OS_PASSWORD").map(|p| SecretString::new(p.into()));
    }
    if fields.token.is_none() {
        fields.token = first_env_var(&["OS_SERVICE_TOKEN", "OS_TOKEN"])
            .map(|t| SecretString::new(t.into()));
    }

    if fields.identity_api_version.is_none()
        && let Some(raw) = env_var_or_none("OS_IDENTITY_API_VERSION")
    {
        let version = raw
            .parse::<IdentityApiVersion>()
            .map_err(|message| ConfigError::InvalidValue {
                var: "OS_IDENTITY_API_VERSION".to_string(),
                message,
            })?;
        fields.identity_api_version = Some(version);
    }

    if fields.cacert.is_none() {
        fields.cacert = env_var_or_none("OS_CACERT").map(PathBuf::from);
    }
    if fields.cert.is_none() {
        fields.cert = env_var_or_none("OS_CERT").map(PathBuf::from);
    }
    if fields.key.is_none() {
        fields.key = env_var_or_none("OS_KEY").map(PathBuf::from);
    }
    if fields.insecure.is_none()
        && let Some(raw) = env_var_or_none("OS_INSECURE")
    {
        fields.insecure = Some(parse_bool("OS_INSECURE", &raw)?);
    }
    if fields.use_keyring.is_none()
        && let Some(raw) = env_var_or_none("OS_CACHE")
    {
        fields.use_keyring = Some(parse_bool("OS_CACHE", &raw)?);
    }
    if fields.timeout.is_none()
        && let Some(raw) = env_var_or_none("OS_TIMEOUT")
    {
        fields.timeout = Some(parse_secs("OS_TIMEOUT", &raw)?);
    }
    if fields.stale_duration.is_none()
        && let Some(raw) = env_var_or_none("OS_STALE_DURATION")
    {
        fields.stale_duration = Some(parse_secs("OS_STALE_DURATION", &raw)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key = "_KEYSTONE_TEST_ENV_VAR";
        assert!(env_var_or_none(key).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key, Some(""))], || {
            assert!(env_var_or_none(key).is_none());
        });
        temp_env::with_vars([(key, Some("   "))], || {
            assert!(env_var_or_none(key).is_none());
        });
        temp_env::with_vars([(key, Some(" value "))], || {
            assert_eq!(env_var_or_none(key), Some("value".to_string()));
        });
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "no").unwrap());
        assert!(matches!(
            parse_bool("X", "maybe"),
            Err(ConfigError::InvalidValue { var, .. }) if var == "X"
        ));
    }
}
