//! Revision cache errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`RevisionCache`](super::RevisionCache) operations.
///
/// Every I/O failure is fatal at the cache layer; nothing is retried.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache key was the empty string.
    #[error("Cache key must not be empty")]
    EmptyKey,

    /// The cache directory could not be created.
    #[error("Failed to create cache directory {}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An artifact could not be written.
    #[error("Failed to write cache artifact {}", path.display())]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An artifact or the cache directory could not be read.
    #[error("Failed to read cache entry {}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An artifact could not be removed.
    #[error("Failed to remove cache entry {}", path.display())]
    Remove {
        /// Path being removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
