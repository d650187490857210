//! JSON formatter: pretty-printed serde output of the resource itself.

use anyhow::Result;
use serde::Serialize;

pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
