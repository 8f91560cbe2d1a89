// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod available;
pub mod init;
pub mod route;
pub mod warehouses;

use std::path::Path;

use anyhow::{Context, Result};
use wms_lib::SqliteRepository;

/// Open the warehouse database read-only, pointing at `init` when it is missing.
pub(crate) fn open_repository(db: &Path) -> Result<SqliteRepository> {
    SqliteRepository::open(db).with_context(|| {
        format!(
            "failed to open warehouse database at {} (create one with `wms-cli init --seed`)",
            db.display()
        )
    })
}
