//! Service catalog command implementation.

use anyhow::Result;
use keystone_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{CatalogRow, OutputFormat, format_list, output_result};

/// Print the catalog that came with the current token, one row per service and region.
pub async fn run(
    config: Config,
    service_type: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!("Showing service catalog");

    let mut client = crate::commands::build_client(&config)?;
    let catalog = cancellable!(client.catalog(), cancel)?;
    let rows = CatalogRow::from_catalog(&catalog, service_type);

    output_result(&format_list(&rows, format)?);
    Ok(())
}
