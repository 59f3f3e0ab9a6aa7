//! Archive-relative paths decomposed for suffix matching.

use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;

/// A relative path split into decoded segments.
///
/// The lookup granularity is the set of all trailing sub-paths: `a/b/c` is
/// known by `a/b/c`, `b/c` and `c`. Rendered links are often re-rooted
/// against a base the exporter cannot know, so two keys are considered
/// related when their suffix sets intersect.
///
/// Construction is lossy on purpose: percent-escapes are decoded, and empty,
/// `.` and `..` segments are dropped. Dropping `..` instead of walking upward
/// keeps every key inside the archive root.
///
/// ```
/// use folio::domain::PathKey;
///
/// let key = PathKey::new("notes/My%20Note.md");
/// let suffixes: Vec<String> = key.suffixes().map(|s| s.join("/")).collect();
/// assert_eq!(suffixes, vec!["notes/My Note.md", "My Note.md"]);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PathKey {
    segments: Vec<String>,
}

impl PathKey {
    /// Decomposes an archive-relative path.
    pub fn new(path: &str) -> Self {
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let segments = decoded
            .split(['/', '\\'])
            .filter(|segment| !matches!(*segment, "" | "." | ".."))
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    /// Decomposes a link or image reference, ignoring any query string or
    /// fragment.
    pub fn from_reference(reference: &str) -> Self {
        let end = reference.find(['?', '#']).unwrap_or(reference.len());
        Self::new(&reference[..end])
    }

    /// The key of the archive root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All trailing sub-paths, longest first.
    pub fn suffixes(&self) -> impl Iterator<Item = &[String]> {
        (0..self.segments.len()).map(move |start| &self.segments[start..])
    }

    /// Number of trailing segments the two keys have in common.
    pub fn common_suffix_len(&self, other: &PathKey) -> usize {
        self.segments
            .iter()
            .rev()
            .zip(other.segments.iter().rev())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Returns true if any suffix of `self` is also a suffix of `other`.
    ///
    /// Two root keys match each other and nothing else.
    pub fn shares_suffix(&self, other: &PathKey) -> bool {
        if self.is_root() || other.is_root() {
            return self.is_root() && other.is_root();
        }
        self.common_suffix_len(other) > 0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl fmt::Debug for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathKey(\"{}\")", self)
    }
}

impl Serialize for PathKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
