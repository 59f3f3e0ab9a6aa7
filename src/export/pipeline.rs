//! The export pipeline: manifest, tree walk, composition, link resolution.

use std::path::Path;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::domain::NoteNode;
use crate::export::compose::{Compositor, DEFAULT_MESSAGE, RenderReport};
use crate::export::links::LinkResolver;
use crate::export::path_index::PathIndex;
use crate::export::template::{DocumentError, RenderOptions, render_document};
use crate::infra::{ArchiveError, ManifestError, read_manifest, unpack};

/// Fatal export errors. Anything not listed here is absorbed per note.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("cannot assemble document: {0}")]
    Compose(#[from] minijinja::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Options for one export run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportOptions<'a> {
    /// Introductory text under the root header.
    pub message: Option<&'a str>,
    /// Document and root title; defaults to [`default_title`].
    pub title: Option<&'a str>,
    /// Template and theme for the outer document.
    pub render: RenderOptions<'a>,
}

/// Counts from the link resolution pass.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct LinkStats {
    pub resolved: usize,
    pub unresolved: usize,
    pub passed_through: usize,
}

/// Everything an export run produces.
#[derive(Debug)]
pub struct ExportOutput {
    /// The final, self-contained document.
    pub html: String,
    /// The note tree, with rendered content filled in.
    pub tree: NoteNode,
    pub index: PathIndex,
    pub report: RenderReport,
    pub links: LinkStats,
}

/// Title used when none is given: `Exported Notes: MM / DD / YYYY`.
pub fn default_title() -> String {
    format!("Exported Notes: {}", Local::now().format("%m / %d / %Y"))
}

/// Unpacks `archive` into a temporary directory and renders it.
///
/// The extracted files are removed before returning.
pub fn export_archive(archive: &Path, options: &ExportOptions) -> Result<ExportOutput, ExportError> {
    log::info!("extracting {}", archive.display());
    let unpacked = unpack(archive)?;
    render_export(unpacked.path(), options)
}

/// Renders an already extracted export rooted at `export_root`.
///
/// # Errors
///
/// Fails if the manifest is missing or corrupt, or if the document template
/// cannot be rendered. Unreadable notes and unresolved links only degrade
/// the output.
pub fn render_export(export_root: &Path, options: &ExportOptions) -> Result<ExportOutput, ExportError> {
    let title = options.title.map_or_else(default_title, str::to_string);

    log::info!("analyzing export metadata");
    let manifest = read_manifest(export_root, &title)?;
    let mut tree = manifest.root;
    let mut index = PathIndex::from_insertions(manifest.insertions);

    log::info!("rendering {} notes", tree.node_count() - 1);
    let compositor = Compositor::new(export_root, options.message.unwrap_or(DEFAULT_MESSAGE))?;
    let composition = compositor.compose(&mut tree)?;
    index.extend(composition.insertions);
    composition.report.log();

    let document = render_document(&title, &composition.html, &options.render)?;

    log::info!("resolving links against {} indexed paths", index.len());
    let resolution = LinkResolver::new(&index).resolve(&document);
    if resolution.unresolved > 0 {
        log::warn!(
            "{} reference(s) could not be resolved and point at the document root",
            resolution.unresolved
        );
    }

    Ok(ExportOutput {
        html: resolution.content,
        tree,
        index,
        report: composition.report,
        links: LinkStats {
            resolved: resolution.resolved,
            unresolved: resolution.unresolved,
            passed_through: resolution.passed_through,
        },
    })
}

/// Renders `source`, which is either an export archive or a directory an
/// export was already extracted to.
pub fn export_source(source: &Path, options: &ExportOptions) -> Result<ExportOutput, ExportError> {
    if source.is_dir() {
        render_export(source, options)
    } else {
        export_archive(source, options)
    }
}

/// Parses the manifest of `source` without rendering any content.
pub fn inspect_source(source: &Path) -> Result<(NoteNode, PathIndex), ExportError> {
    let title = default_title();
    let manifest = if source.is_dir() {
        read_manifest(source, &title)?
    } else {
        let unpacked = unpack(source)?;
        read_manifest(unpacked.path(), &title)?
    };
    Ok((manifest.root, PathIndex::from_insertions(manifest.insertions)))
}
