//! Git commit and file change information

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Commit, Delta, Diff, Patch, Repository};

use crate::git::SHORT_HASH_LEN;

/// Commit information structure
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Full SHA-1 hash of the commit
    pub hash: String,
    /// Commit author name and email address
    pub author: String,
    /// Commit date with the author's timezone
    pub date: DateTime<FixedOffset>,
    /// The commit message as written by the author
    pub message: String,
    /// Files changed relative to the first parent
    pub file_changes: Vec<FileChange>,
}

/// Individual file change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Git status code (A=added, M=modified, D=deleted, R=renamed)
    pub status: String,
    /// Path to the file relative to repository root
    pub file: String,
    /// Lines added
    pub insertions: usize,
    /// Lines removed
    pub deletions: usize,
}

impl CommitInfo {
    /// Create CommitInfo from git2::Commit
    pub fn from_git_commit(repo: &Repository, commit: &Commit) -> Result<Self> {
        let hash = commit.id().to_string();

        let author = format!(
            "{} <{}>",
            commit.author().name().unwrap_or("Unknown"),
            commit.author().email().unwrap_or("unknown@example.com")
        );

        let timestamp = commit.author().when();
        let offset = FixedOffset::east_opt(timestamp.offset_minutes() * 60).unwrap_or(Utc.fix());
        let date = DateTime::from_timestamp(timestamp.seconds(), 0)
            .context("Invalid commit timestamp")?
            .with_timezone(&offset);

        let message = commit.message().unwrap_or("").to_string();

        let commit_tree = commit.tree().context("Failed to get commit tree")?;
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

        // Initial commits diff against the empty tree
        let diff = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)
            .context("Failed to create diff")?;
        let file_changes = collect_file_changes(&diff)?;

        Ok(Self {
            hash,
            author,
            date,
            message,
            file_changes,
        })
    }

    /// Abbreviated commit hash
    pub fn short_hash(&self) -> &str {
        &self.hash[..SHORT_HASH_LEN.min(self.hash.len())]
    }

    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    /// Message lines after the subject, trimmed
    pub fn body(&self) -> &str {
        match self.message.split_once('\n') {
            Some((_, rest)) => rest.trim(),
            None => "",
        }
    }
}

/// Collect per-file status and line counts from a diff
pub fn collect_file_changes(diff: &Diff<'_>) -> Result<Vec<FileChange>> {
    let mut changes = Vec::new();

    for (idx, delta) in diff.deltas().enumerate() {
        let status = match delta.status() {
            Delta::Added => "A",
            Delta::Deleted => "D",
            Delta::Modified => "M",
            Delta::Renamed => "R",
            Delta::Copied => "C",
            Delta::Typechange => "T",
            _ => "?",
        };

        let path = delta.new_file().path().or_else(|| delta.old_file().path());
        let Some(file) = path.map(|p| p.to_string_lossy().into_owned()) else {
            continue;
        };

        // Binary files have no patch
        let (insertions, deletions) = match Patch::from_diff(diff, idx)
            .with_context(|| format!("Failed to create patch for {file}"))?
        {
            Some(patch) => {
                let (_, insertions, deletions) = patch
                    .line_stats()
                    .with_context(|| format!("Failed to count lines for {file}"))?;
                (insertions, deletions)
            }
            None => (0, 0),
        };

        changes.push(FileChange {
            status: status.to_string(),
            file,
            insertions,
            deletions,
        });
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let blob = repo.blob(b"content\n").unwrap();
        let mut builder = repo.treebuilder(None).unwrap();
        builder.insert(b"caf\xe9.txt".to_vec(), blob, 0o100_644).unwrap();
        builder.insert("plain.txt", blob, 0o100_644).unwrap();
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();

        let diff = repo.diff_tree_to_tree(None, Some(&tree), None).unwrap();
        let changes = collect_file_changes(&diff).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].file, "caf\u{FFFD}.txt");
        assert_eq!(changes[0].status, "A");
        assert_eq!(changes[0].insertions, 1);
        assert_eq!(changes[1].file, "plain.txt");
    }
}
