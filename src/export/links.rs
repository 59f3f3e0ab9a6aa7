//! Link resolution over the composed document.
//!
//! Every `<a href>` and `<img src>` that still holds an archive-relative
//! path is rewritten to an in-document anchor or to inlined data, using the
//! [`PathIndex`] built during the tree walk.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{NoteId, PathKey};
use crate::export::html::escape_html;
use crate::export::path_index::{PathIndex, Target, resolve};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(a|img)\b[^>]*>").expect("valid tag regex"));
// Attribute values may be double-quoted, single-quoted or unquoted.
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\shref\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid href regex")
});
static SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\ssrc\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid src regex")
});
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("valid scheme regex"));

/// Result of resolving links in a document.
#[derive(Debug)]
pub struct LinkResolution {
    /// The document with rewritten references.
    pub content: String,
    /// Number of references that matched an index entry.
    pub resolved: usize,
    /// Number of references that fell back to the root anchor or an empty
    /// source.
    pub unresolved: usize,
    /// Number of references left untouched (absolute URLs, data URIs,
    /// in-document fragments).
    pub passed_through: usize,
}

/// Which attribute a reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `href` of an anchor element.
    Link,
    /// `src` of an image element.
    Image,
}

/// How one reference was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Left as written.
    Unchanged,
    /// Replaced with the index target.
    Resolved(String),
    /// No index entry matched; replaced with the fallback.
    Fallback(String),
}

/// Rewrites archive-relative references into in-document targets.
pub struct LinkResolver<'a> {
    index: &'a PathIndex,
    root: NoteId,
}

impl<'a> LinkResolver<'a> {
    pub fn new(index: &'a PathIndex) -> Self {
        Self {
            index,
            root: NoteId::root(),
        }
    }

    /// Rewrites every anchor `href` and image `src` in `html`.
    pub fn resolve(&self, html: &str) -> LinkResolution {
        let mut resolved = 0;
        let mut unresolved = 0;
        let mut passed_through = 0;

        let content = TAG_RE.replace_all(html, |tag: &Captures| {
            let (attr_re, kind) = if tag[1].eq_ignore_ascii_case("img") {
                (&*SRC_RE, RefKind::Image)
            } else {
                (&*HREF_RE, RefKind::Link)
            };

            attr_re
                .replace(&tag[0], |attr: &Captures| {
                    let raw = attr
                        .get(2)
                        .or_else(|| attr.get(3))
                        .or_else(|| attr.get(4))
                        .map_or("", |m| m.as_str());
                    let reference = unescape_attr(raw);
                    let value = match self.rewrite(&reference, kind) {
                        Rewrite::Unchanged => {
                            passed_through += 1;
                            return attr[0].to_string();
                        }
                        Rewrite::Resolved(value) => {
                            resolved += 1;
                            value
                        }
                        Rewrite::Fallback(value) => {
                            log::debug!("unresolved reference '{}'", reference);
                            unresolved += 1;
                            value
                        }
                    };
                    format!("{}\"{}\"", &attr[1], escape_html(&value))
                })
                .into_owned()
        });

        LinkResolution {
            content: content.into_owned(),
            resolved,
            unresolved,
            passed_through,
        }
    }

    /// Decides what a single reference becomes.
    pub fn rewrite(&self, reference: &str, kind: RefKind) -> Rewrite {
        if is_passthrough(reference) {
            return Rewrite::Unchanged;
        }

        let key = PathKey::from_reference(reference);
        match (resolve(&key, self.index), kind) {
            (Some(Target::Inline { data_uri, .. }), _) => Rewrite::Resolved(data_uri.clone()),
            (Some(Target::Anchor { id }), RefKind::Link) => Rewrite::Resolved(format!("#{}", id)),
            // An image pointing at a note has nothing to display.
            (Some(Target::Anchor { .. }), RefKind::Image) => Rewrite::Resolved(String::new()),
            (None, RefKind::Link) => Rewrite::Fallback(format!("#{}", self.root)),
            (None, RefKind::Image) => Rewrite::Fallback(String::new()),
        }
    }
}

/// Checks if a reference already points somewhere usable: an absolute URL,
/// inlined data, an in-document fragment, or a mail/phone URI.
fn is_passthrough(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    SCHEME_RE.is_match(&lower)
        || lower.starts_with("data:")
        || lower.starts_with('#')
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
}

/// Decodes the entities the markdown engine and templates emit in
/// attribute values.
fn unescape_attr(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
