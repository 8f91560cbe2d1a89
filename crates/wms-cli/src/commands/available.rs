//! Available command handler for stock lookups.

use std::path::Path;

use anyhow::{Context, Result};

use wms_lib::find_available_bins;

use wms_cli::output::OutputFormat;

use super::open_repository;

/// List bins holding `sku`, largest stock first.
pub fn handle_available(db: &Path, sku: &str, quantity: i64, format: OutputFormat) -> Result<()> {
    let repository = open_repository(db)?;
    let bins = find_available_bins(&repository, sku, quantity)
        .with_context(|| format!("failed to look up stock for {sku}"))?;
    format.render_available(sku, quantity, &bins)?;
    Ok(())
}
