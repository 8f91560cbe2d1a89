//! Shared helpers for the CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Temporary directory holding the database used by one test.
pub struct TestEnv {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

impl TestEnv {
    /// Empty directory; no database file exists yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("wms.db");
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Directory with a database seeded from the demo warehouse.
    #[allow(dead_code)]
    pub fn seeded() -> Self {
        let env = Self::new();
        env.cmd().args(["init", "--seed"]).assert().success();
        env
    }

    /// `wms-cli` pointed at this environment's database.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("wms-cli");
        cmd.env("RUST_LOG", "error")
            .env("NO_COLOR", "1")
            .arg("--db")
            .arg(&self.db_path);
        cmd
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }
}
