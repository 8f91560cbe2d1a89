//! Route and path command handlers.

use std::path::Path;

use anyhow::{Context, Result};

use wms_lib::{build_graph, optimal_route, shortest_path, Error as LibError, WarehouseGraph};

use wms_cli::output::OutputFormat;

use super::open_repository;

fn load_graph(db: &Path, warehouse: &str) -> Result<WarehouseGraph> {
    let repository = open_repository(db)?;
    build_graph(&repository, warehouse)
        .with_context(|| format!("failed to build the location graph for {warehouse}"))
}

/// Handle the route subcommand.
///
/// Orders `bins` into a picking route starting at the first one.
pub fn handle_route(db: &Path, warehouse: &str, bins: &[String], format: OutputFormat) -> Result<()> {
    let graph = load_graph(db, warehouse)?;
    let result = optimal_route(&graph, bins).map_err(route_failure)?;
    format.render_route(&result)?;
    Ok(())
}

/// Handle the path subcommand.
pub fn handle_path(
    db: &Path,
    warehouse: &str,
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<()> {
    let graph = load_graph(db, warehouse)?;
    let result = shortest_path(&graph, from, to).map_err(route_failure)?;
    format.render_path(&result)?;
    Ok(())
}

fn route_failure(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownLocation { code } => {
            anyhow::anyhow!("Unknown bin '{code}' in this warehouse.")
        }
        LibError::NoPathFound { start, goal } => anyhow::anyhow!(
            "No path found between {start} and {goal}. The bins are not connected in this warehouse."
        ),
        other => anyhow::Error::new(other),
    }
}
