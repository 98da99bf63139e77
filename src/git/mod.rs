//! Source-control operations.
//!
//! [`SourceControl`] is the seam between the workflows and git itself. The
//! production implementation ([`GitCli`]) shells out to the `git` binary;
//! tests substitute fakes returning canned text and errors.

use anyhow::Result;

pub mod cli;

pub use cli::GitCli;

/// Trait for source-control operations.
pub trait SourceControl {
    /// Returns the diff of staged changes. Empty means nothing is staged.
    fn staged_diff(&self) -> Result<String>;

    /// Creates a commit with the given message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Folds staged changes into HEAD and replaces its message.
    ///
    /// One atomic operation from the caller's point of view, even if the
    /// implementation performs it in several steps.
    fn amend(&self, message: &str) -> Result<()>;

    /// Returns the name of the currently checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Returns the base branch, preferring `main` over `master`.
    fn base_branch(&self) -> Result<String>;

    /// Returns one `<short-hash> <subject>` line per commit in
    /// `base..HEAD`. Empty means no commits ahead of base.
    fn commit_history(&self, base: &str) -> Result<String>;

    /// Pushes the current branch to its remote.
    fn push(&self) -> Result<()>;

    /// Force-pushes the current branch to its remote.
    fn force_push(&self) -> Result<()>;
}
