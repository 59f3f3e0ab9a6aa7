//! The note tree: one `NoteNode` per exported note, nested in manifest order.

use serde::Serialize;
use std::fmt;

/// Identifier reserved for the synthetic root of every export.
pub const ROOT_ID: &str = "root";

/// Stable identifier of a note, unique within one export.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates an identifier from its raw manifest value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier of the synthetic root node.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Returns true if this is the synthetic root identifier.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// What a note is, as far as rendering is concerned.
///
/// Types the exporter never renders (raw attachments) are filtered out while
/// parsing and have no variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteKind {
    /// A container whose only job is to hold children.
    Book,
    /// A text note, exported as markdown.
    Text,
    /// A drawing with an embedded SVG rendition.
    Canvas,
    /// Any other renderable type (code, image, mermaid, ...), keeping the
    /// manifest's type name.
    Other(String),
}

impl NoteKind {
    /// Manifest type names dropped during parsing.
    pub const EXCLUDED: &'static [&'static str] = &["file"];

    /// Maps a manifest type name to a kind, or `None` for excluded types.
    pub fn from_manifest(type_name: &str) -> Option<Self> {
        if Self::EXCLUDED.contains(&type_name) {
            return None;
        }
        Some(match type_name {
            "book" => Self::Book,
            "text" => Self::Text,
            "canvas" => Self::Canvas,
            other => Self::Other(other.to_string()),
        })
    }

    /// The manifest type name this kind was parsed from.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Book => "book",
            Self::Text => "text",
            Self::Canvas => "canvas",
            Self::Other(name) => name,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Book)
    }
}

impl Serialize for NoteKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.type_name())
    }
}

/// One entry in the note tree.
#[derive(Debug, Clone, Serialize)]
pub struct NoteNode {
    pub title: String,
    pub id: NoteId,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Backing content file, relative to the directory of the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Directory holding the files of this node's children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_path: Option<String>,
    /// Rendered fragment; `None` until the content renderer has run.
    #[serde(skip)]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NoteNode>,
}

impl NoteNode {
    /// Creates a node with no file, directory, or children.
    pub fn new(id: NoteId, title: impl Into<String>, kind: NoteKind) -> Self {
        Self {
            title: title.into(),
            id,
            kind,
            mime: None,
            source_file: None,
            dir_path: None,
            content: None,
            children: Vec::new(),
        }
    }

    /// Creates the synthetic root that holds the top-level manifest entries.
    pub fn root(title: impl Into<String>, children: Vec<NoteNode>) -> Self {
        Self {
            dir_path: Some(String::new()),
            children,
            ..Self::new(NoteId::root(), title, NoteKind::Book)
        }
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Directory context handed to this node's children, given the context
    /// this node itself was reached with.
    pub fn child_dir(&self, dir: &str) -> String {
        join_rel(dir, self.dir_path.as_deref().unwrap_or(""))
    }

    /// Full archive-relative path of the backing file, if any.
    pub fn file_path(&self, dir: &str) -> Option<String> {
        self.source_file.as_deref().map(|file| join_rel(dir, file))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NoteNode::node_count).sum::<usize>()
    }

    /// Depth-first, pre-order iteration over this subtree.
    pub fn iter(&self) -> impl Iterator<Item = &NoteNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Joins two archive-relative paths with `/`, skipping empty sides.
pub fn join_rel(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, rest),
    }
}
