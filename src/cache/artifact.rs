//! Artifact kinds and the on-disk naming of cached artifacts.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::CacheError;

/// The two categories of generated text stored per cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Natural-language description of a change.
    Summary,
    /// Document describing the commits relevant to a key.
    History,
}

impl ArtifactKind {
    /// All artifact kinds.
    pub const ALL: [Self; 2] = [Self::Summary, Self::History];

    /// Returns the suffix used in artifact file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::History => "history",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the file name of the artifact for `(key, kind)`: `<key>-<kind>.md`.
pub(crate) fn file_name(key: &str, kind: ArtifactKind) -> Result<String, CacheError> {
    if key.is_empty() {
        return Err(CacheError::EmptyKey);
    }

    Ok(format!("{}-{}.md", encode_key(key), kind))
}

/// Escapes the characters that could leave the cache directory.
///
/// `%` is escaped as well so distinct keys never share a file name.
fn encode_key(key: &str) -> Cow<'_, str> {
    if !key.contains(['%', '/', '\\', '\0']) {
        return Cow::Borrowed(key);
    }

    let mut encoded = String::with_capacity(key.len() + 8);
    for ch in key.chars() {
        match ch {
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '\\' => encoded.push_str("%5C"),
            '\0' => encoded.push_str("%00"),
            other => encoded.push(other),
        }
    }
    Cow::Owned(encoded)
}

/// Scoped handle on an artifact path being written.
///
/// A transient (non-verbose) artifact is deleted when the handle is
/// settled, or on drop if the write bailed out before settling.
pub(crate) struct PendingArtifact {
    path: PathBuf,
    retain: bool,
    settled: bool,
}

impl PendingArtifact {
    pub(crate) fn new(path: PathBuf, retain: bool) -> Self {
        Self {
            path,
            retain,
            settled: false,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Finishes the write, removing the artifact unless it is retained.
    pub(crate) fn settle(mut self) -> Result<(), CacheError> {
        self.settled = true;

        if self.retain {
            debug!(path = %self.path.display(), "Retained cache artifact");
            return Ok(());
        }

        remove_if_present(&self.path).map_err(|source| CacheError::Remove {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "Removed transient cache artifact");
        Ok(())
    }
}

impl Drop for PendingArtifact {
    fn drop(&mut self) {
        if self.settled || self.retain {
            return;
        }

        if let Err(err) = remove_if_present(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to remove transient cache artifact"
            );
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
