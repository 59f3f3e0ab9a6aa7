//! Tree composition: one nested fragment per note, in manifest order.

use std::path::Path;

use minijinja::{Environment, Value, context};
use serde::Serialize;

use crate::domain::{NoteId, NoteNode};
use crate::export::content::{DegradedNote, NodeRender, render_content};
use crate::export::html::escape_html;
use crate::export::path_index::PathInsertion;

/// Introductory text shown under the root header when none is given.
pub const DEFAULT_MESSAGE: &str = "This document was generated from a note export.";

/// Template for a single note fragment.
///
/// The header carries the note id; resolved internal links point at it.
/// Containers get a more prominent heading than leaf notes.
pub const NOTE_TEMPLATE: &str = r##"<div class="note">
<div class="note-header" id="{{ id }}">{% if container %}<h2>{{ title }}</h2>{% else %}<h4>{{ title }}</h4>{% endif %}</div>
{{ content }}
<div class="note-children">{{ children }}</div>
</div>
"##;

const NOTE_TEMPLATE_NAME: &str = "note.html";

/// Per-export summary of how notes were rendered.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RenderReport {
    /// Notes that produced a fragment.
    pub rendered: usize,
    /// Notes with no content of their own.
    pub empty: usize,
    /// Notes whose content was replaced by empty output.
    pub degraded: Vec<DegradedNote>,
    /// Subtrees left out because their fragment could not be assembled.
    pub skipped: Vec<DegradedNote>,
}

impl RenderReport {
    fn record(&mut self, node: &NoteNode, outcome: &NodeRender) {
        match outcome {
            NodeRender::Rendered(_) => self.rendered += 1,
            NodeRender::Empty => self.empty += 1,
            NodeRender::Degraded { reason } => self.degraded.push(DegradedNote {
                id: node.id.clone(),
                title: node.title.clone(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn has_problems(&self) -> bool {
        !self.degraded.is_empty() || !self.skipped.is_empty()
    }

    /// Logs degraded and skipped notes, once per export.
    pub fn log(&self) {
        if !self.has_problems() {
            log::debug!("rendered {} notes, {} without content", self.rendered, self.empty);
            return;
        }
        log::warn!(
            "{} note(s) rendered as empty content, {} subtree(s) skipped",
            self.degraded.len(),
            self.skipped.len()
        );
        for note in &self.degraded {
            log::warn!("  degraded '{}' ({}): {}", note.title, note.id, note.reason);
        }
        for note in &self.skipped {
            log::warn!("  skipped '{}' ({}): {}", note.title, note.id, note.reason);
        }
    }
}

/// The composed body plus everything the walk produced on the side.
#[derive(Debug, Default)]
pub struct Composition {
    pub html: String,
    /// Index entries for inlined assets, in tree order.
    pub insertions: Vec<PathInsertion>,
    pub report: RenderReport,
}

/// Assembles a note tree into one nested fragment.
pub struct Compositor<'a> {
    env: Environment<'static>,
    export_root: &'a Path,
    message: &'a str,
}

impl<'a> Compositor<'a> {
    /// Creates a compositor reading content files below `export_root`.
    /// `message` replaces the content of the synthetic root.
    pub fn new(export_root: &'a Path, message: &'a str) -> Result<Self, minijinja::Error> {
        Self::with_note_template(export_root, message, NOTE_TEMPLATE)
    }

    /// Like [`Compositor::new`], with `template` in place of
    /// [`NOTE_TEMPLATE`]. It receives `id`, `title`, `container`, `content`
    /// and `children`.
    pub fn with_note_template(
        export_root: &'a Path,
        message: &'a str,
        template: &'static str,
    ) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(NOTE_TEMPLATE_NAME, template)?;
        Ok(Self {
            env,
            export_root,
            message,
        })
    }

    /// Renders the whole tree. Each node's `content` is filled in as it is
    /// rendered.
    ///
    /// # Errors
    ///
    /// Fails only if the root fragment itself cannot be assembled; failures
    /// below the root skip the affected subtree.
    pub fn compose(&self, root: &mut NoteNode) -> Result<Composition, minijinja::Error> {
        let mut composition = Composition::default();
        let child_dir = root.child_dir("");
        composition.html = self.compose_node(root, "", &child_dir, &mut composition)?;
        Ok(composition)
    }

    /// `dir` is the context `node` was reached with, `child_dir` the one
    /// handed to its children.
    fn compose_node(
        &self,
        node: &mut NoteNode,
        dir: &str,
        child_dir: &str,
        acc: &mut Composition,
    ) -> Result<String, minijinja::Error> {
        let content = if node.is_root() {
            format!("<p class=\"export-message\">{}</p>", escape_html(self.message))
        } else {
            let rendered = render_content(self.export_root, node, dir);
            acc.report.record(node, &rendered.outcome);
            acc.insertions.extend(rendered.insertion);
            rendered.outcome.fragment().to_string()
        };
        node.content = Some(content.clone());

        let mut children = String::new();
        for child in node.children.iter_mut() {
            let grandchild_dir = child.child_dir(child_dir);
            match self.compose_node(child, child_dir, &grandchild_dir, acc) {
                Ok(fragment) => children.push_str(&fragment),
                Err(err) => {
                    log::warn!("skipping '{}' ({}): {}", child.title, child.id, err);
                    acc.report.skipped.push(DegradedNote {
                        id: child.id.clone(),
                        title: child.title.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        self.render_fragment(&node.id, &node.title, node.kind.is_container(), content, children)
    }

    fn render_fragment(
        &self,
        id: &NoteId,
        title: &str,
        container: bool,
        content: String,
        children: String,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(NOTE_TEMPLATE_NAME)?;
        tmpl.render(context! {
            id => id.as_str(),
            title => title,
            container => container,
            content => Value::from_safe_string(content),
            children => Value::from_safe_string(children),
        })
    }
}
