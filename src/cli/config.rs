//! Configuration-related CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::cli::resolve_cache;
use crate::utils::Settings;

/// Configuration operations.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommands {
    /// Shows the resolved configuration as YAML.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser, Debug)]
pub struct ShowCommand {}

/// Resolved configuration as printed by `config show`.
#[derive(Debug, Serialize)]
pub struct ConfigView {
    /// Location of the settings file.
    pub settings_path: PathBuf,
    /// Whether the settings file exists.
    pub settings_found: bool,
    /// Cache directory in effect.
    pub cache_dir: PathBuf,
    /// Loaded settings.
    pub settings: Settings,
}

impl ConfigCommand {
    /// Runs the config command.
    pub fn run_in(&self, project_root: &Path, cache_dir: Option<&Path>) -> Result<String> {
        match &self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.run_in(project_root, cache_dir),
        }
    }
}

impl ShowCommand {
    /// Renders the resolved configuration.
    pub fn run_in(&self, project_root: &Path, cache_dir: Option<&Path>) -> Result<String> {
        let settings_path = Settings::get_settings_path()?;
        let settings = Settings::load_from_path(&settings_path)?;
        let cache = resolve_cache(project_root, cache_dir)?;

        let view = ConfigView {
            settings_found: settings_path.exists(),
            settings_path,
            cache_dir: cache.root().to_path_buf(),
            settings,
        };

        serde_yaml::to_string(&view).context("Failed to serialize configuration")
    }
}
