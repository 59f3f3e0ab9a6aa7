//! Handler for the `render` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::config::Config;
use crate::cli::output::{RenderResult, print_result};
use crate::cli::{ExportFormat, RenderArgs};
use crate::export::{
    ExportOptions, ExportOutput, RenderOptions, export_source, open_preview, render_pdf,
    write_html,
};

/// Handle the `render` command.
pub fn handle_render(args: &RenderArgs, config: &Config) -> Result<()> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.export_format.default_output());
    let to_stdout = output_path == Path::new("-");
    if to_stdout && args.export_format == ExportFormat::Pdf {
        bail!("PDF output cannot be written to stdout; use --format html");
    }

    let options = ExportOptions {
        message: config.message(args.message.as_deref()),
        title: args.title.as_deref(),
        render: RenderOptions {
            template_path: config.template(args.template.as_deref()),
            theme: config.theme(args.theme.as_deref()),
        },
    };
    let export = export_source(&args.source, &options)
        .with_context(|| format!("failed to render {}", args.source.display()))?;

    if args.preview {
        let path = open_preview(&export.html)?;
        report(args, &export, &path, "html", "Opened preview");
        return Ok(());
    }

    if to_stdout {
        print!("{}", export.html);
        return Ok(());
    }

    match args.export_format {
        ExportFormat::Html => {
            write_html(&output_path, &export.html)?;
            report(args, &export, &output_path, "html", "Wrote");
        }
        ExportFormat::Pdf => {
            let engine = config.pdf_engine(args.pdf_engine);
            render_pdf(&export.html, &output_path, engine)?;
            report(args, &export, &output_path, "pdf", "Wrote");
        }
    }

    Ok(())
}

fn report(args: &RenderArgs, export: &ExportOutput, path: &Path, format: &'static str, verb: &str) {
    let notes = export.tree.node_count() - 1;
    let mut human = format!("{} {} ({} notes)", verb, path.display(), notes);
    if export.report.has_problems() {
        human.push_str(&format!(
            ", {} degraded, {} skipped",
            export.report.degraded.len(),
            export.report.skipped.len()
        ));
    }
    if export.links.unresolved > 0 {
        human.push_str(&format!(", {} unresolved links", export.links.unresolved));
    }

    print_result(
        args.cli_format,
        RenderResult {
            path: path.display().to_string(),
            format,
            notes,
            report: &export.report,
            links: export.links,
        },
        &human,
    );
}
