//! CLI interface for giv.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::cache::{RevisionCache, CACHED_KEY, CURRENT_KEY};
use crate::utils::Settings;

pub mod clear_cache;
pub mod config;
pub mod history;
pub mod summary;

pub use clear_cache::ClearCacheCommand;
pub use config::ConfigCommand;
pub use history::HistoryCommand;
pub use summary::SummaryCommand;

/// giv: Git change summaries and commit history documents.
#[derive(Parser)]
#[command(name = "giv")]
#[command(about = "Git change summaries and commit history documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Cache directory (defaults to .giv/cache under the current directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Summarizes the changes of a revision.
    Summary(SummaryCommand),
    /// Builds the commit history document of a revision.
    History(HistoryCommand),
    /// Removes every cached summary and history document.
    #[command(name = "clear-cache")]
    ClearCache(ClearCacheCommand),
    /// Configuration information.
    Config(ConfigCommand),
}

impl Cli {
    /// Executes the CLI command in the current directory.
    pub fn execute(self) -> Result<()> {
        let project_root = env::current_dir().context("Failed to get current directory")?;
        let cache_dir = self.cache_dir.as_deref();

        let output = match &self.command {
            Commands::Summary(cmd) => cmd.run_in(&project_root, cache_dir)?,
            Commands::History(cmd) => cmd.run_in(&project_root, cache_dir)?,
            Commands::ClearCache(cmd) => cmd.run_in(&project_root, cache_dir)?,
            Commands::Config(cmd) => cmd.run_in(&project_root, cache_dir)?,
        };

        print!("{output}");
        Ok(())
    }
}

/// Revision selection shared by commands that read git history.
#[derive(Args, Debug, Clone, Default)]
pub struct RevisionArgs {
    /// Revision or range to describe (e.g. HEAD~3..HEAD, v1.0, abc123).
    #[arg(value_name = "REVISION", conflicts_with_all = ["current", "cached"])]
    pub revision: Option<String>,

    /// Describes working tree changes against HEAD (the default).
    #[arg(long, conflicts_with = "cached")]
    pub current: bool,

    /// Describes staged changes against HEAD.
    #[arg(long)]
    pub cached: bool,
}

impl RevisionArgs {
    /// Returns the cache key for the selected revision.
    pub fn key(&self) -> &str {
        match &self.revision {
            Some(revision) => revision.as_str(),
            None if self.cached => CACHED_KEY,
            None => CURRENT_KEY,
        }
    }
}

/// Resolves the cache for a project, preferring an explicit `--cache-dir`.
pub(crate) fn resolve_cache(project_root: &Path, cache_dir: Option<&Path>) -> Result<RevisionCache> {
    let root = match cache_dir {
        Some(dir) => project_root.join(dir),
        None => Settings::load()?.resolve_cache_dir(project_root),
    };

    Ok(RevisionCache::new(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_clear_cache() {
        let cli = Cli::try_parse_from(["giv", "clear-cache", "--verbose"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::ClearCache(ClearCacheCommand { verbose: true })
        ));
    }

    #[test]
    fn parses_sentinel_revision() {
        let cli = Cli::try_parse_from(["giv", "summary", "--cached"]).unwrap();
        match cli.command {
            Commands::Summary(cmd) => assert_eq!(cmd.revision.key(), "--cached"),
            _ => panic!("expected summary command"),
        }
    }

    #[test]
    fn parses_range_revision() {
        let cli = Cli::try_parse_from(["giv", "history", "v1.0..HEAD", "-v"]).unwrap();
        match cli.command {
            Commands::History(cmd) => {
                assert_eq!(cmd.revision.key(), "v1.0..HEAD");
                assert!(cmd.verbose);
            }
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn revision_defaults_to_current() {
        let cli = Cli::try_parse_from(["giv", "history"]).unwrap();
        match cli.command {
            Commands::History(cmd) => assert_eq!(cmd.revision.key(), "--current"),
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn revision_and_sentinel_conflict() {
        assert!(Cli::try_parse_from(["giv", "summary", "--cached", "HEAD"]).is_err());
        assert!(Cli::try_parse_from(["giv", "summary", "--cached", "--current"]).is_err());
    }

    #[test]
    fn global_cache_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["giv", "clear-cache", "--cache-dir", "/tmp/c"]).unwrap();
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
    }

    #[test]
    fn explicit_cache_dir_is_relative_to_project() {
        let cache = resolve_cache(Path::new("/work/repo"), Some(Path::new("tmp/cache"))).unwrap();
        assert_eq!(cache.root(), Path::new("/work/repo/tmp/cache"));
    }
}
