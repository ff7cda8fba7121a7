//! Disk-backed cache of generated summary and history artifacts.
//!
//! Artifacts are keyed by a revision specifier (`--current`, `--cached`, a
//! tag, a SHA or a range) and an [`ArtifactKind`], and live at
//! `<root>/<key>-<kind>.md`. Whether an artifact survives a write is decided
//! by the `verbose` flag passed to that write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

mod artifact;
mod error;

pub use artifact::ArtifactKind;
pub use error::CacheError;

use artifact::PendingArtifact;

/// Sentinel key for working tree changes against HEAD.
pub const CURRENT_KEY: &str = "--current";

/// Sentinel key for staged changes against HEAD.
pub const CACHED_KEY: &str = "--cached";

/// Cache directory relative to the project root.
pub const CACHE_DIR: &str = ".giv/cache";

/// Revision-keyed artifact store rooted at an explicit directory.
#[derive(Debug, Clone)]
pub struct RevisionCache {
    root: PathBuf,
}

impl RevisionCache {
    /// Creates a cache rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a cache at `<project_root>/.giv/cache`.
    pub fn in_project(project_root: &Path) -> Self {
        Self::new(project_root.join(CACHE_DIR))
    }

    /// Returns the cache directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the artifact for `(key, kind)`.
    pub fn artifact_path(&self, key: &str, kind: ArtifactKind) -> Result<PathBuf, CacheError> {
        Ok(self.root.join(artifact::file_name(key, kind)?))
    }

    /// Writes `content` as the `kind` artifact for `key`.
    ///
    /// The artifact is kept only when `verbose` is set. A non-verbose write
    /// still replaces and then deletes the file, so a previously retained
    /// artifact for the same key does not survive it.
    pub fn store(
        &self,
        key: &str,
        kind: ArtifactKind,
        content: &str,
        verbose: bool,
    ) -> Result<(), CacheError> {
        let pending = PendingArtifact::new(self.artifact_path(key, kind)?, verbose);

        fs::create_dir_all(&self.root).map_err(|source| CacheError::CreateDir {
            path: self.root.clone(),
            source,
        })?;

        self.write_atomic(pending.path(), content)
            .map_err(|source| CacheError::Write {
                path: pending.path().to_path_buf(),
                source,
            })?;
        debug!(key, %kind, bytes = content.len(), "Wrote cache artifact");

        pending.settle()
    }

    /// Caches a generated summary for `key`.
    pub fn cache_summary(&self, key: &str, content: &str, verbose: bool) -> Result<(), CacheError> {
        self.store(key, ArtifactKind::Summary, content, verbose)
    }

    /// Caches a generated commit history document for `key`.
    pub fn cache_history(&self, key: &str, content: &str, verbose: bool) -> Result<(), CacheError> {
        self.store(key, ArtifactKind::History, content, verbose)
    }

    /// Reads a retained artifact, returning `None` when it does not exist.
    pub fn load(&self, key: &str, kind: ArtifactKind) -> Result<Option<String>, CacheError> {
        let path = self.artifact_path(key, kind)?;

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(key, %kind, "Cache hit");
                Ok(Some(content))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(key, %kind, "Cache miss");
                Ok(None)
            }
            Err(source) => Err(CacheError::Read { path, source }),
        }
    }

    /// Removes every entry under the cache directory and returns how many
    /// were removed.
    ///
    /// A missing cache directory counts as already clear.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "Cache directory does not exist");
                return Ok(0);
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|source| CacheError::Read {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .map(|t| t.is_dir())
                .map_err(|source| CacheError::Read {
                    path: path.clone(),
                    source,
                })?;

            let result = if is_dir {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.map_err(|source| CacheError::Remove {
                path: path.clone(),
                source,
            })?;
            removed += 1;
        }

        info!(root = %self.root.display(), removed, "Cleared cache");
        Ok(removed)
    }

    /// Writes through a temporary file in the cache directory so readers
    /// never observe a partially written artifact.
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(content.as_bytes())?;
        file.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}
