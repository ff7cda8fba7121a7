//! Summary and commit history generation backed by the revision cache.

use anyhow::{Context, Result};
use tracing::debug;

use crate::cache::{ArtifactKind, RevisionCache};
use crate::git::{commit::collect_file_changes, GitRepository, Revision};

pub mod render;

pub use render::{render_history, render_summary};

/// Builds summary and history documents for revision keys and routes them
/// through a [`RevisionCache`].
pub struct CommitSummarizer {
    repo: GitRepository,
    cache: RevisionCache,
}

impl CommitSummarizer {
    /// Creates a summarizer over `repo` that caches into `cache`.
    pub fn new(repo: GitRepository, cache: RevisionCache) -> Self {
        Self { repo, cache }
    }

    /// Returns the cache artifacts are written to.
    pub fn cache(&self) -> &RevisionCache {
        &self.cache
    }

    /// Returns the summary for `key`.
    ///
    /// A retained summary is reused only for pinned keys (full object ids),
    /// whose changes cannot move. Branches, tags, `HEAD`, `--current` and
    /// `--cached` are recomputed. Either way the result goes through
    /// [`RevisionCache::cache_summary`], so a non-verbose run leaves no
    /// summary behind.
    pub fn summarize(&self, key: &str, verbose: bool) -> Result<String> {
        let revision = Revision::parse(key);

        let cached = if revision.is_pinned() {
            self.cache.load(key, ArtifactKind::Summary)?
        } else {
            None
        };

        let summary = match cached {
            Some(summary) => {
                debug!(key, "Using cached summary");
                summary
            }
            None => {
                let diff = self.repo.diff_for(&revision)?;
                let changes = collect_file_changes(&diff)
                    .with_context(|| format!("Failed to read changes for {key}"))?;
                render_summary(&revision, &changes)
            }
        };

        self.cache.cache_summary(key, &summary, verbose)?;
        Ok(summary)
    }

    /// Builds the commit history document for `key` and caches it.
    pub fn build_commit_history(&self, key: &str, verbose: bool) -> Result<String> {
        let revision = Revision::parse(key);

        let commits = self
            .repo
            .commits_for(&revision)
            .with_context(|| format!("Failed to read commit history for {key}"))?;

        let pending = if revision.is_pending() {
            let diff = self.repo.diff_for(&revision)?;
            Some(collect_file_changes(&diff)?)
        } else {
            None
        };

        let history = render_history(&revision, &commits, pending.as_deref());
        debug!(key, commits = commits.len(), "Built commit history");

        self.cache.cache_history(key, &history, verbose)?;
        Ok(history)
    }
}
