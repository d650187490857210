//! Serde helpers for Keystone's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept ids as JSON strings or numbers (older deployments use integer ids).
//! - Accept `enabled` flags as booleans or strings.
//! - Accept lists either as bare arrays or wrapped in `{"values": [...]}`.
//!
//! Invariants / assumptions:
//! - These helpers must not log or print secrets; errors are generic parse errors.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::U64(v) => v.to_string(),
            StringOrNumber::I64(v) => v.to_string(),
            StringOrNumber::F64(v) => v.to_string(),
        }
    }
}

pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

pub fn opt_bool_from_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("invalid boolean: {s}"))),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListOrValues<T> {
    List(Vec<T>),
    Values { values: Vec<T> },
}

/// Deserialize `[...]` or `{"values": [...]}` into a `Vec`.
pub fn list_or_values<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match ListOrValues::<T>::deserialize(deserializer)? {
        ListOrValues::List(items) | ListOrValues::Values { values: items } => Ok(items),
    }
}
