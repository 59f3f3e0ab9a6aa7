//! Mapping from archive paths to in-document targets.
//!
//! The index is assembled from explicit [`PathInsertion`]s: the manifest walk
//! produces one per file-backed note, and the content renderer produces one
//! per inlined asset. Nothing mutates it once link resolution starts.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{NoteId, PathKey};

/// Where a path resolves to inside the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Target {
    /// The header anchor of a note.
    Anchor { id: NoteId },
    /// A note whose bytes are embedded as a data URI.
    Inline {
        id: NoteId,
        #[serde(skip)]
        data_uri: String,
    },
}

impl Target {
    pub fn anchor(id: NoteId) -> Self {
        Self::Anchor { id }
    }

    pub fn inline(id: NoteId, data_uri: impl Into<String>) -> Self {
        Self::Inline {
            id,
            data_uri: data_uri.into(),
        }
    }

    /// The note this target belongs to.
    pub fn id(&self) -> &NoteId {
        match self {
            Self::Anchor { id } | Self::Inline { id, .. } => id,
        }
    }
}

/// One pending index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInsertion {
    pub key: PathKey,
    pub target: Target,
}

impl PathInsertion {
    pub fn new(key: PathKey, target: Target) -> Self {
        Self { key, target }
    }
}

/// Path-to-target index with first-writer-wins semantics.
///
/// Entries keep their insertion order, which is the manifest order of the
/// notes that produced them. A key that is already present is never handed
/// to a different note. The one exception is a note replacing its own
/// anchor with its own inlined payload.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    entries: Vec<(PathKey, Target)>,
    positions: HashMap<PathKey, usize>,
}

impl PathIndex {
    /// Creates an index holding only the reserved root entry.
    pub fn new() -> Self {
        let mut index = Self::default();
        index.insert(PathKey::root(), Target::anchor(NoteId::root()));
        index
    }

    /// Creates an index from the reserved root entry plus `insertions`, in
    /// order.
    pub fn from_insertions(insertions: impl IntoIterator<Item = PathInsertion>) -> Self {
        let mut index = Self::new();
        index.extend(insertions);
        index
    }

    /// Inserts an entry. Returns true if the index changed.
    pub fn insert(&mut self, key: PathKey, target: Target) -> bool {
        match self.positions.get(&key) {
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, target));
                true
            }
            Some(&pos) => {
                let existing = &mut self.entries[pos].1;
                let upgrade = existing.id() == target.id()
                    && matches!(existing, Target::Anchor { .. })
                    && matches!(target, Target::Inline { .. });
                if upgrade {
                    *existing = target;
                }
                upgrade
            }
        }
    }

    pub fn extend(&mut self, insertions: impl IntoIterator<Item = PathInsertion>) {
        for PathInsertion { key, target } in insertions {
            if !self.insert(key.clone(), target) {
                log::trace!("path index: kept existing entry for '{}'", key);
            }
        }
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &PathKey) -> Option<&Target> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &Target)> {
        self.entries.iter().map(|(key, target)| (key, target))
    }
}

/// Resolves a reference key against the index.
///
/// Candidates are the stored keys whose suffix sets intersect the
/// reference's. Matching by membership rather than full-path equality means
/// a bare file name resolves even when the link was written relative to a
/// different base, and also that colliding file names in different folders
/// can resolve to the wrong note.
///
/// Among candidates, the one sharing the longest trailing run of segments
/// wins; ties go to the entry inserted first.
pub fn resolve<'a>(reference: &PathKey, index: &'a PathIndex) -> Option<&'a Target> {
    let mut best: Option<(usize, &Target)> = None;
    for (key, target) in index.iter() {
        if !reference.shares_suffix(key) {
            continue;
        }
        let score = reference.common_suffix_len(key);
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, target));
        }
    }
    best.map(|(_, target)| target)
}
