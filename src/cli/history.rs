//! History command — builds the commit history document of a revision.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{resolve_cache, RevisionArgs};
use crate::summarization::CommitSummarizer;
use crate::utils::check_git_repository;

/// History command options.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Revision whose history to build.
    #[command(flatten)]
    pub revision: RevisionArgs,

    /// Keeps the generated history in the cache.
    #[arg(short, long)]
    pub verbose: bool,
}

impl HistoryCommand {
    /// Runs the command for the project at `project_root` and returns the
    /// history document.
    pub fn run_in(&self, project_root: &Path, cache_dir: Option<&Path>) -> Result<String> {
        let repo = check_git_repository(project_root)?;
        let cache = resolve_cache(project_root, cache_dir)?;

        CommitSummarizer::new(repo, cache).build_commit_history(self.revision.key(), self.verbose)
    }
}
