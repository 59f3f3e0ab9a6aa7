//! Handing the rendered document to its destination: an HTML file, an
//! external PDF engine, or the platform browser.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

/// Errors delivering a rendered document.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PDF engine '{engine}' not found; install it or choose another with --pdf-engine")]
    EngineNotFound { engine: String },

    #[error("PDF engine '{engine}' failed ({status}): {stderr}")]
    EngineFailed {
        engine: String,
        status: String,
        stderr: String,
    },

    #[error("could not open browser: {0}")]
    Browser(#[source] io::Error),
}

/// External programs that can turn an HTML file into a PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngine {
    /// wkhtmltopdf (runs the page's scripts, so math is typeset)
    #[default]
    Wkhtmltopdf,
    /// WeasyPrint
    Weasyprint,
}

impl PdfEngine {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Wkhtmltopdf => "wkhtmltopdf",
            Self::Weasyprint => "weasyprint",
        }
    }

    /// Builds the command converting `input` to `output`.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            Self::Wkhtmltopdf => {
                cmd.args(["--quiet", "--enable-local-file-access", "--javascript-delay", "1000"]);
            }
            Self::Weasyprint => {
                cmd.arg("--quiet");
            }
        }
        cmd.arg(input).arg(output);
        cmd
    }
}

/// Writes the document to `path`, creating parent directories.
pub fn write_html(path: &Path, html: &str) -> Result<(), DeliveryError> {
    let io_err = |source| DeliveryError::Io {
        path: path.into(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, html).map_err(io_err)
}

/// Renders the document to a PDF at `output` with an external engine.
pub fn render_pdf(html: &str, output: &Path, engine: PdfEngine) -> Result<(), DeliveryError> {
    let input = html_temp_file(html)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DeliveryError::Io {
            path: parent.into(),
            source,
        })?;
    }
    log::info!("rendering PDF with {}", engine.program());
    run_engine(engine.command(input.path(), output), engine.program())
}

fn run_engine(mut cmd: Command, engine: &str) -> Result<(), DeliveryError> {
    let output = cmd.output().map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DeliveryError::EngineNotFound {
            engine: engine.to_string(),
        },
        _ => DeliveryError::Io {
            path: PathBuf::from(engine),
            source,
        },
    })?;

    if !output.status.success() {
        return Err(DeliveryError::EngineFailed {
            engine: engine.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Writes the document to a persistent temporary file and opens it in the
/// platform browser. Returns the file's path.
pub fn open_preview(html: &str) -> Result<PathBuf, DeliveryError> {
    let file = html_temp_file(html)?;
    let (_, path) = file.keep().map_err(|err| DeliveryError::Io {
        path: std::env::temp_dir(),
        source: err.error,
    })?;

    log::info!("opening {}", path.display());
    browser_command(&path)
        .spawn()
        .map_err(DeliveryError::Browser)?;
    Ok(path)
}

fn html_temp_file(html: &str) -> Result<tempfile::NamedTempFile, DeliveryError> {
    let io_err = |source| DeliveryError::Io {
        path: std::env::temp_dir(),
        source,
    };
    let mut file = tempfile::Builder::new()
        .prefix("folio-")
        .suffix(".html")
        .tempfile()
        .map_err(io_err)?;
    file.write_all(html.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(file)
}

fn browser_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_html_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/nested/doc.html");

        write_html(&path, "<html></html>").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn engine_command_passes_input_and_output() {
        let cmd = PdfEngine::Wkhtmltopdf.command(Path::new("in.html"), Path::new("out.pdf"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();

        assert_eq!(cmd.get_program(), "wkhtmltopdf");
        assert_eq!(&args[args.len() - 2..], ["in.html", "out.pdf"]);
        assert!(args.contains(&"--enable-local-file-access".to_string()));
    }

    #[test]
    fn weasyprint_command() {
        let cmd = PdfEngine::Weasyprint.command(Path::new("in.html"), Path::new("out.pdf"));
        assert_eq!(cmd.get_program(), "weasyprint");
    }

    #[test]
    fn missing_engine_is_reported() {
        let cmd = Command::new("folio-test-no-such-pdf-engine");
        let err = run_engine(cmd, "folio-test-no-such-pdf-engine").unwrap_err();

        assert!(matches!(err, DeliveryError::EngineNotFound { .. }));
    }

    #[test]
    fn temp_file_has_html_suffix() {
        let file = html_temp_file("<p>x</p>").unwrap();

        assert!(file.path().to_string_lossy().ends_with(".html"));
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "<p>x</p>");
    }

    #[test]
    fn engine_config_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            engine: PdfEngine,
        }
        let parsed: Wrapper = toml::from_str("engine = \"weasyprint\"").unwrap();
        assert_eq!(parsed.engine, PdfEngine::Weasyprint);
    }
}
