//! Archive extraction into a temporary directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use zip::ZipArchive;

/// Errors while unpacking an export archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid zip archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// An extracted archive. The directory is removed on drop.
#[derive(Debug)]
pub struct UnpackedArchive {
    dir: TempDir,
}

impl UnpackedArchive {
    /// Root of the extracted tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Unpacks a zip archive into a fresh temporary directory.
///
/// An entry whose name would escape the target directory fails the whole
/// extraction.
pub fn unpack(archive: &Path) -> Result<UnpackedArchive, ArchiveError> {
    let file = File::open(archive).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArchiveError::NotFound {
            path: archive.into(),
        },
        _ => ArchiveError::Io {
            path: archive.into(),
            source,
        },
    })?;

    let zip_err = |source| ArchiveError::Zip {
        path: archive.into(),
        source,
    };
    let mut zip = ZipArchive::new(file).map_err(zip_err)?;

    let dir = TempDir::new().map_err(|source| ArchiveError::Io {
        path: std::env::temp_dir(),
        source,
    })?;
    log::debug!(
        "unpacking {} entries from {} into {}",
        zip.len(),
        archive.display(),
        dir.path().display()
    );
    zip.extract(dir.path()).map_err(zip_err)?;

    Ok(UnpackedArchive { dir })
}
