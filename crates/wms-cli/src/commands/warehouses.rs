//! Warehouses command handler.

use std::path::Path;

use anyhow::{Context, Result};

use wms_lib::WarehouseRepository;

use wms_cli::output::OutputFormat;

use super::open_repository;

/// List every warehouse in the database.
pub fn handle_warehouses(db: &Path, format: OutputFormat) -> Result<()> {
    let repository = open_repository(db)?;
    let warehouses = repository
        .warehouses()
        .context("failed to list warehouses")?;
    format.render_warehouses(&warehouses)?;
    Ok(())
}
