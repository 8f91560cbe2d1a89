//! Init command handler for creating warehouse databases.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use wms_lib::{demo, write_database, InMemoryRepository};

use wms_cli::output::{InitSummary, OutputFormat};

/// Where the contents of a new database come from.
#[derive(Debug, Clone)]
pub enum InitSource<'a> {
    /// Schema only.
    Empty,
    /// The demo distribution center.
    Demo,
    /// Warehouses and products exported as JSON.
    Json(&'a Path),
}

/// Handle the init subcommand.
///
/// Refuses to touch an existing file unless `force` is set.
pub fn handle_init(
    db: &Path,
    source: InitSource<'_>,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    if db.exists() {
        if !force {
            bail!(
                "database already exists at {}; pass --force to replace it",
                db.display()
            );
        }
        fs::remove_file(db)
            .with_context(|| format!("failed to remove existing database {}", db.display()))?;
    }

    let repository = match source {
        InitSource::Empty => InMemoryRepository::new(),
        InitSource::Demo => demo::demo_repository(),
        InitSource::Json(path) => InMemoryRepository::from_json_file(path)
            .with_context(|| format!("failed to read warehouse data from {}", path.display()))?,
    };

    write_database(db, &repository)
        .with_context(|| format!("failed to write warehouse database {}", db.display()))?;

    let summary = InitSummary {
        database: db.display().to_string(),
        warehouses: repository.hierarchies().len(),
        bins: repository
            .hierarchies()
            .iter()
            .map(|hierarchy| hierarchy.bin_count())
            .sum(),
        products: repository.products().len(),
    };
    info!(
        database = %summary.database,
        warehouses = summary.warehouses,
        bins = summary.bins,
        "warehouse database initialised"
    );

    format.render_init(&summary)?;
    Ok(())
}
