//! Core types: NoteNode tree, NoteId, PathKey

mod note;
mod path_key;

pub use note::{NoteId, NoteKind, NoteNode, ROOT_ID, join_rel};
pub use path_key::PathKey;
