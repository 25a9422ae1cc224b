// src/error.rs
//! Two error kinds with different recovery rules:
//! - `IndexError` is skippable. The header indexer records it and moves on.
//! - `ScanError` is fatal. The source scanner returns it and no partial corpus.

use std::{
    io,
    path::{
        Path,
        PathBuf
    }
};
use thiserror::Error;

/// A system include root (or something inside it) could not be walked.
/// Never returned as `Err`; collected on the catalog instead.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("include root {} is unavailable: {source}", root.display())]
    RootUnavailable {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("skipping unreadable entry {} under include root: {source}", path.display())]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    pub fn path(&self) -> &Path {
        match self {
            IndexError::RootUnavailable { root, .. } => root,
            IndexError::EntryUnreadable { path, .. } => path,
        }
    }
}

/// A project could not be scanned. The caller must see this.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to walk project {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read project file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// `walkdir` errors carry an io error except for symlink loops; fold both into one.
pub(crate) fn walk_io_error(err: walkdir::Error) -> io::Error {
    let msg = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, msg))
}
