//! Export manifest parsing.
//!
//! The manifest (`!!!meta.json` at the archive root) describes the note
//! hierarchy. Parsing turns it into a typed [`NoteNode`] tree and, in the
//! same walk, collects the path-index entries of every file-backed note.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{NoteId, NoteKind, NoteNode, PathKey, ROOT_ID};
use crate::export::{PathInsertion, Target};

/// File name of the manifest inside an extracted export.
pub const MANIFEST_FILE: &str = "!!!meta.json";

/// Fatal manifest errors. Either one aborts the export.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest missing: {path}")]
    Missing { path: PathBuf },

    #[error("manifest unreadable: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("manifest corrupt: {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top level of the manifest file.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    files: Vec<ManifestEntry>,
}

/// One note as described by the manifest. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    #[serde(default)]
    title: String,
    note_id: String,
    #[serde(rename = "type", default)]
    note_type: String,
    mime: Option<String>,
    data_file_name: Option<String>,
    dir_file_name: Option<String>,
    #[serde(default)]
    is_clone: bool,
    #[serde(default)]
    children: Vec<ManifestEntry>,
}

/// A parsed manifest: the note tree plus the index entries found while
/// walking it, in manifest order.
#[derive(Debug)]
pub struct ParsedManifest {
    pub root: NoteNode,
    pub insertions: Vec<PathInsertion>,
}

/// Reads and parses the manifest of an extracted export.
///
/// # Errors
///
/// Returns `ManifestError::Missing` if the manifest file does not exist and
/// `ManifestError::Corrupt` if it is not valid manifest JSON.
pub fn read_manifest(export_root: &Path, root_title: &str) -> Result<ParsedManifest, ManifestError> {
    let path = export_root.join(MANIFEST_FILE);
    let contents = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ManifestError::Missing { path: path.clone() },
        _ => ManifestError::Io {
            path: path.clone(),
            source,
        },
    })?;
    parse_manifest(&contents, root_title).map_err(|source| ManifestError::Corrupt { path, source })
}

/// Parses manifest JSON into a tree under a synthetic root titled
/// `root_title`.
pub fn parse_manifest(json: &str, root_title: &str) -> Result<ParsedManifest, serde_json::Error> {
    let manifest: Manifest = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut insertions = Vec::new();
    let mut children = Vec::new();
    for entry in manifest.files {
        if let Some((node, found)) = convert_entry(entry, "", &mut seen) {
            children.push(node);
            insertions.extend(found);
        }
    }

    let root = NoteNode::root(root_title, children);
    log::debug!(
        "manifest: {} notes, {} file paths",
        root.node_count() - 1,
        insertions.len()
    );
    Ok(ParsedManifest { root, insertions })
}

/// Converts one entry and its descendants.
///
/// `dir` is the directory context accumulated from the ancestors. Returns
/// `None` for entries that do not become nodes, together with their whole
/// subtree.
fn convert_entry(
    entry: ManifestEntry,
    dir: &str,
    seen: &mut HashSet<String>,
) -> Option<(NoteNode, Vec<PathInsertion>)> {
    let Some(kind) = NoteKind::from_manifest(&entry.note_type) else {
        log::debug!("manifest: skipping {} note '{}'", entry.note_type, entry.title);
        return None;
    };
    if entry.is_clone {
        log::debug!("manifest: skipping clone of '{}'", entry.note_id);
        return None;
    }
    if entry.note_id == ROOT_ID {
        log::warn!(
            "manifest: note '{}' uses the reserved id '{}', skipping it",
            entry.title,
            ROOT_ID
        );
        return None;
    }
    if !seen.insert(entry.note_id.clone()) {
        log::warn!(
            "manifest: duplicate note id '{}' ('{}'), keeping the first",
            entry.note_id,
            entry.title
        );
        return None;
    }

    let mut node = NoteNode::new(NoteId::new(entry.note_id), entry.title, kind);
    node.mime = entry.mime;
    node.source_file = entry.data_file_name;
    node.dir_path = entry.dir_file_name;

    let mut insertions = Vec::new();
    if let Some(path) = node.file_path(dir) {
        insertions.push(PathInsertion::new(
            PathKey::new(&path),
            Target::anchor(node.id.clone()),
        ));
    }

    let child_dir = node.child_dir(dir);
    for child in entry.children {
        if let Some((child_node, found)) = convert_entry(child, &child_dir, seen) {
            node.children.push(child_node);
            insertions.extend(found);
        }
    }

    Some((node, insertions))
}
