//! Isolated environments for CLI integration tests.

use std::path::{Path, PathBuf};

use anyhow::Result;
use assert_cmd::Command;
use assert_cmd::assert::Assert;
use tempfile::TempDir;

/// Temp-dir test environment with its own data directory.
///
/// # Example
/// ```no_run
/// use tplmarket_testing::TestWorld;
///
/// let world = TestWorld::new();
/// world.run(&["seed"]).unwrap().success();
/// ```
pub struct TestWorld {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".tplmarket");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    /// Get the data directory path (.tplmarket).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Run the CLI with this world's data directory.
    pub fn run(&self, args: &[&str]) -> Result<Assert> {
        let mut cmd = Command::cargo_bin("tplmarket")?;
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd.args(args);
        Ok(cmd.assert())
    }
}
