//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::PdfEngine;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default CSS theme (default, dark, or path to CSS file)
    pub theme: Option<String>,

    /// Default document template
    pub template: Option<PathBuf>,

    /// PDF engine used for PDF output
    pub pdf_engine: Option<PdfEngine>,

    /// Introductory message under the root heading
    pub message: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `config_path`, or defaults if it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/folio/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Resolve the theme, with CLI argument taking precedence.
    pub fn theme<'a>(&'a self, cli_theme: Option<&'a str>) -> Option<&'a str> {
        cli_theme.or(self.theme.as_deref())
    }

    /// Resolve the template path, with CLI argument taking precedence.
    pub fn template<'a>(&'a self, cli_template: Option<&'a Path>) -> Option<&'a Path> {
        cli_template.or(self.template.as_deref())
    }

    /// Resolve the root message, with CLI argument taking precedence.
    pub fn message<'a>(&'a self, cli_message: Option<&'a str>) -> Option<&'a str> {
        cli_message.or(self.message.as_deref())
    }

    /// Resolve the PDF engine.
    ///
    /// Precedence order:
    /// 1. CLI `--pdf-engine` argument
    /// 2. Config file `pdf_engine` setting
    /// 3. wkhtmltopdf
    pub fn pdf_engine(&self, cli_engine: Option<PdfEngine>) -> PdfEngine {
        cli_engine.or(self.pdf_engine).unwrap_or_default()
    }
}
