//! Version-control adapter.
//!
//! ```text
//! application --> VersionControl (trait) --> GitCli --> git
//! ```
//!
//! Callers decide only on the three signals exposed here; the output text
//! of the underlying tool is never inspected.

mod git;

pub use git::GitCli;

use anyhow::Result;
use std::path::Path;

/// Result of a successful pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    AlreadyCurrent,
}

#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Clone `url` into `dest`, which must not exist yet.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Pull the configured upstream into the working copy.
    fn pull(&self, working_copy: &Path) -> Result<UpdateOutcome>;

    /// Whether the working copy has at least one remote configured.
    fn has_remote(&self, working_copy: &Path) -> bool;
}
