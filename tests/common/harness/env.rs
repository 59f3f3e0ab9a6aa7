//! Isolated test environment with temp directory.

// Not every test binary uses every helper
#![allow(dead_code)]

use super::{FolioCommand, TestExport};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// The directory doubles as the config home, so a user's own
/// `folio/config.toml` never leaks into a test run.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the environment's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a path inside the environment.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Writes `export` as `export.zip` and returns its path.
    pub fn add_archive(&self, export: &TestExport) -> PathBuf {
        let path = self.path("export.zip");
        export.write_zip(&path);
        path
    }

    /// Writes `export` as an extracted directory and returns its path.
    pub fn add_export_dir(&self, export: &TestExport) -> PathBuf {
        let path = self.path("extracted");
        std::fs::create_dir_all(&path).expect("Failed to create export directory");
        export.write_dir(&path);
        path
    }

    /// Writes a config file that the CLI will pick up.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.path("config").join("folio");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    ///
    /// Useful for creating custom templates, CSS files, etc.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a command running inside this environment.
    pub fn cmd(&self) -> FolioCommand {
        FolioCommand::new()
            .current_dir(&self.root)
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("HOME", &self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
