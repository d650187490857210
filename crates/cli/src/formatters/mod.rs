//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render resources as aligned tables or pretty-printed JSON.
//! - Describe each resource type's columns once, through [`ResourceDisplay`].
//!
//! Does NOT handle:
//! - Fetching data (see `commands`).
//!
//! Invariants:
//! - JSON output of an empty list is `[]`; tables print a human message instead.
//! - Missing values render as `N/A` in tables and `null` in JSON.

use anyhow::Result;
use serde::Serialize;
use std::str::FromStr;

mod json;
mod resource_impls;
mod table;

pub use resource_impls::{CatalogRow, TokenSummary};

/// Placeholder for missing values in tables.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Invalid output format: {s}. Valid options: table, json"),
        }
    }
}

/// Self-describing tabular view of a resource.
pub trait ResourceDisplay {
    /// Plural name used in the empty-list message.
    const PLURAL: &'static str;

    fn headers() -> Vec<&'static str>;

    /// One cell per header.
    fn row(&self) -> Vec<String>;
}

pub fn format_missing(opt: Option<&str>) -> String {
    opt.unwrap_or(DEFAULT_MISSING_VALUE).to_string()
}

pub fn format_missing_display<T: std::fmt::Display>(opt: Option<T>) -> String {
    opt.map(|v| v.to_string())
        .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
}

/// Render a list of resources.
pub fn format_list<T: ResourceDisplay + Serialize>(
    items: &[T],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::format_list(items)),
        OutputFormat::Json => json::format(items),
    }
}

/// Render a single resource; tables use a Property/Value layout.
pub fn format_item<T: ResourceDisplay + Serialize>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::format_item(item)),
        OutputFormat::Json => json::format(item),
    }
}

/// Print to stdout, terminated by exactly one newline.
pub fn output_result(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
