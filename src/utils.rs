//! Utility functions and helpers.

pub mod preflight;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_env;

pub use preflight::check_git_repository;
pub use settings::Settings;
