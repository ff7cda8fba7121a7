//! Summary command — describes the changes of a revision.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{resolve_cache, RevisionArgs};
use crate::summarization::CommitSummarizer;
use crate::utils::check_git_repository;

/// Summary command options.
#[derive(Parser, Debug)]
pub struct SummaryCommand {
    /// Revision to summarize.
    #[command(flatten)]
    pub revision: RevisionArgs,

    /// Keeps the generated summary in the cache.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SummaryCommand {
    /// Runs the command for the project at `project_root` and returns the
    /// summary.
    pub fn run_in(&self, project_root: &Path, cache_dir: Option<&Path>) -> Result<String> {
        // Preflight check: validate git repository before any processing
        let repo = check_git_repository(project_root)?;
        let cache = resolve_cache(project_root, cache_dir)?;

        CommitSummarizer::new(repo, cache).summarize(self.revision.key(), self.verbose)
    }
}
