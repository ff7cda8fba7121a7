//! Settings and configuration utilities.
//!
//! This module reads settings from $HOME/.giv/settings.json and uses them as
//! a fallback for environment variables and to locate the cache directory.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cache::CACHE_DIR;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "GIV_CACHE_DIR";

/// Settings loaded from $HOME/.giv/settings.json.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Cache directory; relative paths resolve against the project root.
    #[serde(default, rename = "cacheDir", skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default settings
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".giv").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Resolves the cache directory for a project.
    ///
    /// Precedence: `GIV_CACHE_DIR` (environment, then `env` settings), then
    /// `cacheDir`, then `<project_root>/.giv/cache`.
    pub fn resolve_cache_dir(&self, project_root: &Path) -> PathBuf {
        let configured = self
            .get_env_var(CACHE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.cache_dir.clone());

        match configured {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => project_root.join(dir),
            None => project_root.join(CACHE_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_env::EnvGuard;
    use tempfile::TempDir;

    #[test]
    fn settings_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");

        let settings_json = r#"{
            "env": {
                "TEST_VAR": "test_value"
            },
            "cacheDir": "/var/cache/giv"
        }"#;
        fs::write(&settings_path, settings_json).unwrap();

        let settings = Settings::load_from_path(&settings_path).unwrap();

        assert_eq!(settings.env.get("TEST_VAR").unwrap(), "test_value");
        assert_eq!(settings.cache_dir, Some(PathBuf::from("/var/cache/giv")));
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("absent.json")).unwrap();

        assert!(settings.env.is_empty());
        assert!(settings.cache_dir.is_none());
    }

    #[test]
    fn malformed_settings_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        fs::write(&settings_path, "{ not json").unwrap();

        assert!(Settings::load_from_path(&settings_path).is_err());
    }

    #[test]
    fn env_takes_precedence_over_settings() {
        let mut guard = EnvGuard::new();
        let mut settings = Settings::default();
        settings
            .env
            .insert("GIV_TEST_VAR".to_string(), "from_settings".to_string());

        guard.set("GIV_TEST_VAR", "from_env");
        assert_eq!(settings.get_env_var("GIV_TEST_VAR").unwrap(), "from_env");

        guard.remove("GIV_TEST_VAR");
        assert_eq!(
            settings.get_env_var("GIV_TEST_VAR").unwrap(),
            "from_settings"
        );
    }

    #[test]
    fn cache_dir_defaults_to_project_cache() {
        let mut guard = EnvGuard::new();
        guard.remove(CACHE_DIR_ENV);

        let dir = Settings::default().resolve_cache_dir(Path::new("/work/repo"));
        assert_eq!(dir, PathBuf::from("/work/repo/.giv/cache"));
    }

    #[test]
    fn cache_dir_from_settings_resolves_relative_to_project() {
        let mut guard = EnvGuard::new();
        guard.remove(CACHE_DIR_ENV);

        let settings = Settings {
            cache_dir: Some(PathBuf::from("build/giv")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve_cache_dir(Path::new("/work/repo")),
            PathBuf::from("/work/repo/build/giv")
        );
    }

    #[test]
    fn cache_dir_env_overrides_settings() {
        let mut guard = EnvGuard::new();
        guard.set(CACHE_DIR_ENV, "/tmp/giv-cache");

        let settings = Settings {
            cache_dir: Some(PathBuf::from("build/giv")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve_cache_dir(Path::new("/work/repo")),
            PathBuf::from("/tmp/giv-cache")
        );
    }
}
