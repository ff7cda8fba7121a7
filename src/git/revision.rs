//! Cache key to git revision resolution.

use std::fmt;

use crate::cache::{CACHED_KEY, CURRENT_KEY};

/// What a cache key refers to in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// Working tree changes against HEAD (`--current`).
    Current,
    /// Staged changes against HEAD (`--cached`).
    Cached,
    /// Any revision expression `git rev-parse` understands: a single
    /// revision, `a..b` or `a...b`.
    Spec(String),
}

impl Revision {
    /// Parses a cache key.
    pub fn parse(key: &str) -> Self {
        match key {
            CURRENT_KEY => Self::Current,
            CACHED_KEY => Self::Cached,
            other => Self::Spec(other.to_string()),
        }
    }

    /// Returns the cache key for this revision.
    pub fn key(&self) -> &str {
        match self {
            Self::Current => CURRENT_KEY,
            Self::Cached => CACHED_KEY,
            Self::Spec(spec) => spec.as_str(),
        }
    }

    /// Returns true for the working tree and index sentinels.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Current | Self::Cached)
    }

    /// Returns true when the key names fixed objects only: a full object id
    /// or a range whose both ends are full object ids. The changes such a
    /// key describes never move, unlike branches, tags or `HEAD`.
    pub fn is_pinned(&self) -> bool {
        let Self::Spec(spec) = self else {
            return false;
        };

        let (from, to) = match spec.split_once("...").or_else(|| spec.split_once("..")) {
            Some((from, to)) => (from, Some(to)),
            None => (spec.as_str(), None),
        };

        is_full_object_id(from) && to.map_or(true, is_full_object_id)
    }
}

/// SHA-1 or SHA-256 object id in full hex form.
fn is_full_object_id(value: &str) -> bool {
    matches!(value.len(), 40 | 64) && value.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
