//! Review-host operations.
//!
//! [`ReviewHost`] is the seam between the workflows and the pull-request
//! host. The production implementation ([`GhCli`]) shells out to the
//! GitHub CLI.

use anyhow::Result;

pub mod cli;

pub use cli::GhCli;

/// Trait for pull-request host operations.
pub trait ReviewHost {
    /// Creates a pull request for the current branch.
    fn create_pull_request(&self, title: &str, description: &str) -> Result<()>;

    /// Edits the current branch's open pull request.
    fn edit_pull_request(&self, title: &str, description: &str) -> Result<()>;

    /// Reports whether the current branch already has an open pull request.
    fn has_open_pull_request(&self) -> Result<bool>;
}
