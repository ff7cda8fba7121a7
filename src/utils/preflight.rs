//! Preflight validation checks for early failure detection
//!
//! Commands call these before touching the cache so that a missing
//! repository fails with a clear message instead of a git2 error.

use std::path::Path;

use anyhow::{Context, Result};

use crate::git::GitRepository;

/// Validate that `project_root` is inside a git repository
pub fn check_git_repository(project_root: &Path) -> Result<GitRepository> {
    GitRepository::discover(project_root).context(
        "Not in a git repository. Please run this command from within a git repository.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_plain_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = check_git_repository(temp_dir.path()).err().unwrap();
        assert!(err.to_string().contains("Not in a git repository"));
    }

    #[test]
    fn accepts_subdirectory_of_repository() {
        let temp_dir = TempDir::new().unwrap();
        git2::Repository::init(temp_dir.path()).unwrap();
        let sub_dir = temp_dir.path().join("src").join("deeper");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let repo = check_git_repository(&sub_dir).unwrap();
        assert_eq!(
            repo.workdir().unwrap().canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }
}
