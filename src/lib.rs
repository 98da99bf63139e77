//! # git-quill
//!
//! AI-assisted commit messages and pull requests for git.
//!
//! Generates commit messages and pull-request titles/descriptions from your
//! staged changes and branch history, then drives `git` and the GitHub CLI
//! to commit, amend, or open/update the pull request.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod claude;
pub mod cli;
pub mod git;
pub mod github;
pub mod utils;
pub mod workflow;

pub use crate::cli::Cli;

/// The current version of git-quill.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
