//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Commit, Diff, ErrorCode, Repository, RevparseMode, Sort, Tree};
use tracing::debug;

use crate::git::{CommitInfo, Revision};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

/// A revision expression resolved to commits
enum ResolvedSpec<'r> {
    /// One commit, compared against its first parent
    Single(Commit<'r>),
    /// `from..to`, or `from...to` when `merge_base` is set
    Range {
        from: Commit<'r>,
        to: Commit<'r>,
        merge_base: bool,
    },
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Open the repository containing `path`, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("No git repository found at {}", path.display()))?;

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the HEAD commit, or None on an unborn branch
    pub fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(
                head.peel_to_commit()
                    .context("Failed to peel HEAD to commit")?,
            )),
            Err(err) if matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("HEAD is unborn");
                Ok(None)
            }
            Err(err) => Err(err).context("Failed to get HEAD reference"),
        }
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        self.head_commit()?
            .map(|commit| commit.tree().context("Failed to get HEAD tree"))
            .transpose()
    }

    /// Get the diff a summary of `revision` describes
    pub fn diff_for(&self, revision: &Revision) -> Result<Diff<'_>> {
        match revision {
            Revision::Current => {
                let head_tree = self.head_tree()?;
                self.repo
                    .diff_tree_to_workdir_with_index(head_tree.as_ref(), None)
                    .context("Failed to diff working tree against HEAD")
            }
            Revision::Cached => {
                let head_tree = self.head_tree()?;
                let index = self.repo.index().context("Failed to read index")?;
                self.repo
                    .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
                    .context("Failed to diff index against HEAD")
            }
            Revision::Spec(spec) => match self.resolve_spec(spec)? {
                ResolvedSpec::Single(commit) => {
                    let parent_tree = if commit.parent_count() > 0 {
                        Some(
                            commit
                                .parent(0)
                                .context("Failed to get parent commit")?
                                .tree()
                                .context("Failed to get parent tree")?,
                        )
                    } else {
                        None
                    };
                    let tree = commit.tree().context("Failed to get commit tree")?;
                    self.repo
                        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
                        .with_context(|| format!("Failed to create diff for {spec}"))
                }
                ResolvedSpec::Range {
                    from,
                    to,
                    merge_base,
                } => {
                    let base = if merge_base {
                        self.merge_base(&from, &to)?
                    } else {
                        from
                    };
                    let base_tree = base.tree().context("Failed to get start tree")?;
                    let to_tree = to.tree().context("Failed to get end tree")?;
                    self.repo
                        .diff_tree_to_tree(Some(&base_tree), Some(&to_tree), None)
                        .with_context(|| format!("Failed to create diff for {spec}"))
                }
            },
        }
    }

    /// Get the commits a history of `revision` describes, oldest first
    ///
    /// The sentinels describe pending changes on top of HEAD, so they yield
    /// the HEAD commit when there is one.
    pub fn commits_for(&self, revision: &Revision) -> Result<Vec<CommitInfo>> {
        let spec = match revision {
            Revision::Current | Revision::Cached => {
                return self
                    .head_commit()?
                    .map(|commit| CommitInfo::from_git_commit(&self.repo, &commit))
                    .into_iter()
                    .collect();
            }
            Revision::Spec(spec) => spec,
        };

        let (from, to, merge_base) = match self.resolve_spec(spec)? {
            ResolvedSpec::Single(commit) => {
                return Ok(vec![CommitInfo::from_git_commit(&self.repo, &commit)?]);
            }
            ResolvedSpec::Range {
                from,
                to,
                merge_base,
            } => (from, to, merge_base),
        };

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .context("Failed to set revwalk sorting")?;
        walker.push(to.id()).context("Failed to push end commit")?;
        if merge_base {
            // Symmetric difference: both sides down to their merge base
            let base = self.merge_base(&from, &to)?;
            walker
                .push(from.id())
                .context("Failed to push start commit")?;
            walker
                .hide(base.id())
                .context("Failed to hide merge base")?;
        } else {
            walker
                .hide(from.id())
                .context("Failed to hide start commit")?;
        }

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;

            // Skip merge commits
            if commit.parent_count() > 1 {
                continue;
            }

            commits.push(CommitInfo::from_git_commit(&self.repo, &commit)?);
        }

        Ok(commits)
    }

    fn resolve_spec(&self, spec: &str) -> Result<ResolvedSpec<'_>> {
        let revspec = self
            .repo
            .revparse(spec)
            .with_context(|| format!("Failed to parse revision: {spec}"))?;

        let from = revspec
            .from()
            .with_context(|| format!("Revision has no start: {spec}"))?
            .peel_to_commit()
            .with_context(|| format!("Failed to peel {spec} to a commit"))?;

        if revspec.mode().contains(RevparseMode::SINGLE) {
            return Ok(ResolvedSpec::Single(from));
        }

        let to = revspec
            .to()
            .with_context(|| format!("Revision range has no end: {spec}"))?
            .peel_to_commit()
            .with_context(|| format!("Failed to peel end of {spec} to a commit"))?;

        Ok(ResolvedSpec::Range {
            from,
            to,
            merge_base: revspec.mode().contains(RevparseMode::MERGE_BASE),
        })
    }

    fn merge_base(&self, a: &Commit<'_>, b: &Commit<'_>) -> Result<Commit<'_>> {
        let oid = self
            .repo
            .merge_base(a.id(), b.id())
            .context("Failed to find merge base")?;
        self.repo
            .find_commit(oid)
            .context("Failed to find merge base commit")
    }
}
