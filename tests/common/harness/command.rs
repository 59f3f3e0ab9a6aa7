//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `folio` binary.
pub struct FolioCommand {
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
}

impl FolioCommand {
    /// Creates a new command for the `folio` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a path argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.as_os_str().to_owned());
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: impl Into<OsString>, value: impl AsRef<Path>) -> Self {
        self.envs
            .push((key.into(), value.as_ref().as_os_str().to_owned()));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("folio").expect("Failed to find folio binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `render` command on `source`.
    pub fn render(self, source: &Path) -> Self {
        self.args(["render"]).arg_path(source)
    }

    /// Configures for the `render` command writing HTML to `output`.
    pub fn render_html(self, source: &Path, output: &Path) -> Self {
        self.render(source)
            .args(["--format", "html", "--output"])
            .arg_path(output)
    }

    /// Configures for the `tree` command on `source`.
    pub fn tree(self, source: &Path) -> Self {
        self.args(["tree"]).arg_path(source)
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the `tree` command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--cli-format json` to the `render` command.
    pub fn cli_format_json(self) -> Self {
        self.args(["--cli-format", "json"])
    }
}

impl Default for FolioCommand {
    fn default() -> Self {
        Self::new()
    }
}
