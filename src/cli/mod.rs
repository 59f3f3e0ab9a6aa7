//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::PdfEngine;
use output::OutputFormat;

/// folio - render a note export archive into one printable document
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an export archive to PDF or HTML
    Render(RenderArgs),

    /// Print the parsed note tree and path index of an export
    Tree(TreeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Document format for the `render` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// HTML document
    Html,
    /// PDF document (requires wkhtmltopdf or weasyprint)
    #[default]
    Pdf,
}

impl ExportFormat {
    /// File written when no `--output` is given.
    pub fn default_output(&self) -> PathBuf {
        match self {
            Self::Html => PathBuf::from("trilium_export.html"),
            Self::Pdf => PathBuf::from("trilium_export.pdf"),
        }
    }
}

/// Arguments for the `render` command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Export archive (.zip) or an already extracted export directory
    pub source: PathBuf,

    /// Document format
    #[arg(short = 'F', long = "format", value_enum, default_value_t = ExportFormat::Pdf)]
    pub export_format: ExportFormat,

    /// Output path ("-" writes HTML to stdout)
    #[arg(short, long, conflicts_with = "preview")]
    pub output: Option<PathBuf>,

    /// Open the rendered HTML in a browser instead of writing a file
    #[arg(short, long)]
    pub preview: bool,

    /// Introductory message under the root heading
    #[arg(short, long)]
    pub message: Option<String>,

    /// Document title (defaults to "Exported Notes: <date>")
    #[arg(long)]
    pub title: Option<String>,

    /// Custom template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// CSS theme (default, dark, or path to CSS file)
    #[arg(long)]
    pub theme: Option<String>,

    /// External program used for PDF output
    #[arg(long, value_enum)]
    pub pdf_engine: Option<PdfEngine>,

    /// CLI output format (for status messages, not document content)
    #[arg(short = 'f', long = "cli-format", value_enum, default_value_t = OutputFormat::Human)]
    pub cli_format: OutputFormat,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Export archive (.zip) or an already extracted export directory
    pub source: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
