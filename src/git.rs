//! Git operations and repository management.

pub mod commit;
pub mod repository;
pub mod revision;

pub use commit::{CommitInfo, FileChange};
pub use repository::GitRepository;
pub use revision::Revision;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
