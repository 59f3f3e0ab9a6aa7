//! Archive extraction and manifest parsing

pub mod archive;
pub mod manifest;

pub use archive::{ArchiveError, UnpackedArchive, unpack};
pub use manifest::{MANIFEST_FILE, ManifestError, ParsedManifest, parse_manifest, read_manifest};
