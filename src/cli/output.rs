//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::NoteNode;
use crate::export::{LinkStats, PathIndex, RenderReport, Target};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Result of a `render` command.
#[derive(Debug, Serialize)]
pub struct RenderResult<'a> {
    /// Where the document went: a file path, "-" for stdout, or the
    /// preview file.
    pub path: String,
    pub format: &'static str,
    /// Number of notes in the tree, not counting the root.
    pub notes: usize,
    pub report: &'a RenderReport,
    pub links: LinkStats,
}

/// One row of the path index listing.
#[derive(Debug, Serialize)]
pub struct IndexListing<'a> {
    pub path: String,
    #[serde(flatten)]
    pub target: &'a Target,
}

/// Result of a `tree` command.
#[derive(Debug, Serialize)]
pub struct TreeListing<'a> {
    pub tree: &'a NoteNode,
    pub index: Vec<IndexListing<'a>>,
}

impl<'a> TreeListing<'a> {
    pub fn new(tree: &'a NoteNode, index: &'a PathIndex) -> Self {
        let index = index
            .iter()
            .map(|(key, target)| IndexListing {
                path: key.to_string(),
                target,
            })
            .collect();
        Self { tree, index }
    }
}

/// Print a result as JSON, or the human message.
pub fn print_result<T: Serialize>(format: OutputFormat, result: T, human: &str) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&Output::new(result)) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("error: failed to serialize output: {}", err),
        },
        OutputFormat::Human => println!("{}", human),
    }
}

/// Formats the tree as an indented outline, one note per line.
pub fn format_tree(root: &NoteNode) -> String {
    let mut out = String::new();
    write_node(root, 0, &mut out);
    out
}

fn write_node(node: &NoteNode, depth: usize, out: &mut String) {
    let file = node
        .source_file
        .as_deref()
        .map(|f| format!("  [{}]", f))
        .unwrap_or_default();
    out.push_str(&format!(
        "{}{} ({}, {}){}\n",
        "  ".repeat(depth),
        node.title,
        node.id,
        node.kind.type_name(),
        file
    ));
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
}
