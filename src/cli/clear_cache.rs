//! Clear-cache command — removes every cached artifact.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::resolve_cache;

/// Clear-cache command options.
#[derive(Parser, Debug)]
pub struct ClearCacheCommand {
    /// Reports how many entries were removed and from where.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClearCacheCommand {
    /// Clears the cache of the project at `project_root`.
    ///
    /// Clearing a cache that was never created succeeds.
    pub fn run_in(&self, project_root: &Path, cache_dir: Option<&Path>) -> Result<String> {
        let cache = resolve_cache(project_root, cache_dir)?;
        let removed = cache
            .clear()
            .with_context(|| format!("Failed to clear cache at {}", cache.root().display()))?;

        if self.verbose {
            Ok(format!(
                "Cache cleared: removed {removed} entr{} from {}\n",
                if removed == 1 { "y" } else { "ies" },
                cache.root().display()
            ))
        } else {
            Ok("Cache cleared.\n".to_string())
        }
    }
}
