//! Per-note content rendering.
//!
//! Each file-backed note becomes one fragment:
//! - markdown files go through [`render_markdown_note`]
//! - canvas notes become an inlined SVG image
//! - anything else is embedded as a base64 data URI and registered in the
//!   path index, so links to the asset resolve to the payload itself
//!
//! Failures never escape a single note: the outcome is a [`NodeRender`], and
//! a degraded note renders as empty content.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{NoteId, NoteKind, NoteNode, PathKey};
use crate::export::html::{escape_html, render_markdown_note};
use crate::export::path_index::{PathInsertion, Target};

/// Mime type used for embedded assets that declare none.
pub const FALLBACK_MIME: &str = "text/plain";

/// Errors reading or decoding one note's content file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid canvas data in {path}: {source}")]
    Canvas {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("canvas {path} has no svg rendition")]
    MissingSvg { path: PathBuf },
}

/// Outcome of rendering one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRender {
    /// The note produced a fragment.
    Rendered(String),
    /// The note has no content of its own (containers).
    Empty,
    /// The note's content could not be rendered and is left empty.
    Degraded { reason: String },
}

impl NodeRender {
    /// The fragment to place in the document.
    pub fn fragment(&self) -> &str {
        match self {
            Self::Rendered(html) => html,
            Self::Empty | Self::Degraded { .. } => "",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Result of rendering one note: the outcome plus the index entry for an
/// inlined asset, if the note produced one.
#[derive(Debug, Clone)]
pub struct RenderedContent {
    pub outcome: NodeRender,
    pub insertion: Option<PathInsertion>,
}

impl RenderedContent {
    fn empty() -> Self {
        Self {
            outcome: NodeRender::Empty,
            insertion: None,
        }
    }
}

/// Shape of a canvas note's file. Only the SVG rendition is used.
#[derive(Debug, Deserialize)]
struct CanvasFile {
    svg: Option<String>,
}

/// Renders the content of `node`, reached with directory context `dir`,
/// reading files below `export_root`.
pub fn render_content(export_root: &Path, node: &NoteNode, dir: &str) -> RenderedContent {
    let Some(rel_path) = node.file_path(dir) else {
        return RenderedContent::empty();
    };

    match render_file(export_root, node, &rel_path) {
        Ok(rendered) => rendered,
        Err(err) => {
            log::debug!("note '{}' ({}): {}", node.title, node.id, err);
            RenderedContent {
                outcome: NodeRender::Degraded {
                    reason: err.to_string(),
                },
                insertion: None,
            }
        }
    }
}

fn render_file(
    export_root: &Path,
    node: &NoteNode,
    rel_path: &str,
) -> Result<RenderedContent, ContentError> {
    let path = export_root.join(rel_path);

    if is_markdown(rel_path) {
        log::debug!("parsing {}", rel_path);
        let markdown = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        return Ok(RenderedContent {
            outcome: NodeRender::Rendered(render_markdown_note(&markdown)),
            insertion: None,
        });
    }

    let bytes = std::fs::read(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;

    if node.kind == NoteKind::Canvas {
        let canvas: CanvasFile =
            serde_json::from_slice(&bytes).map_err(|source| ContentError::Canvas {
                path: path.clone(),
                source,
            })?;
        let svg = canvas.svg.ok_or(ContentError::MissingSvg { path })?;
        let src = data_uri("image/svg+xml", svg.as_bytes());
        return Ok(RenderedContent {
            outcome: NodeRender::Rendered(format!(
                "<img class=\"note-canvas\" src=\"{}\" alt=\"{}\">",
                src,
                escape_html(&node.title)
            )),
            insertion: None,
        });
    }

    let mime = node.mime.as_deref().unwrap_or(FALLBACK_MIME);
    let src = data_uri(mime, &bytes);
    let fragment = asset_fragment(node, mime, &src, rel_path);
    Ok(RenderedContent {
        outcome: NodeRender::Rendered(fragment),
        insertion: Some(PathInsertion::new(
            PathKey::new(rel_path),
            Target::inline(node.id.clone(), src),
        )),
    })
}

/// Builds a `data:` URI with a base64 payload.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

fn asset_fragment(node: &NoteNode, mime: &str, src: &str, rel_path: &str) -> String {
    let title = escape_html(&node.title);
    if mime.starts_with("image/") {
        format!("<img class=\"note-image\" src=\"{}\" alt=\"{}\">", src, title)
    } else {
        let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        format!(
            "<p class=\"note-attachment\"><a href=\"{}\" download=\"{}\">{}</a></p>",
            src,
            escape_html(file_name),
            title
        )
    }
}

fn is_markdown(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// A note whose content was replaced by empty output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedNote {
    pub id: NoteId,
    pub title: String,
    pub reason: String,
}
