//! # giv
//!
//! Git change summaries and commit history documents, with an on-disk cache
//! keyed by revision.
//!
//! ## Quick Start
//!
//! ```rust
//! use giv::cache::RevisionCache;
//!
//! let dir = tempfile::tempdir()?;
//! let cache = RevisionCache::in_project(dir.path());
//!
//! // Verbose writes are retained, others are removed once written.
//! cache.cache_summary("--current", "feat: add X", true)?;
//! assert!(cache.artifact_path("--current", giv::cache::ArtifactKind::Summary)?.exists());
//!
//! cache.clear()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cache;
pub mod cli;
pub mod git;
pub mod summarization;
pub mod utils;

pub use crate::cache::{ArtifactKind, CacheError, RevisionCache};
pub use crate::cli::Cli;
pub use crate::summarization::CommitSummarizer;

/// The current version of giv.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
