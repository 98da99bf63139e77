//! Source control backed by the `git` binary.

use anyhow::{Context, Result};
use tracing::debug;

use super::SourceControl;
use crate::utils::exec;

/// [`SourceControl`] implementation that shells out to `git`.
pub struct GitCli(());

impl GitCli {
    /// Creates the implementation, verifying that `git` is available.
    pub fn new() -> Result<Self> {
        exec::run("git", &["--version"])
            .context("git is not installed or not found in PATH")?;
        Ok(Self(()))
    }
}

/// Whether a failed push reported a missing upstream branch.
fn is_no_upstream(err: &exec::CommandError) -> bool {
    err.output().contains("has no upstream branch")
}

impl SourceControl for GitCli {
    fn staged_diff(&self) -> Result<String> {
        Ok(exec::run("git", &["diff", "--staged"])?)
    }

    fn commit(&self, message: &str) -> Result<()> {
        exec::run("git", &["commit", "-m", message])?;
        Ok(())
    }

    fn amend(&self, message: &str) -> Result<()> {
        // Fold staged changes in first, then rewrite the message; git has
        // no single command doing both with a non-interactive editor.
        exec::run("git", &["commit", "--amend", "--no-edit"])
            .context("error amending commit")?;
        exec::run("git", &["commit", "--amend", "-m", message])
            .context("error updating commit message")?;
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let branch = exec::run("git", &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(branch.trim().to_string())
    }

    fn base_branch(&self) -> Result<String> {
        for candidate in ["main", "master"] {
            let git_ref = format!("refs/heads/{candidate}");
            if exec::run("git", &["show-ref", "--verify", "--quiet", &git_ref]).is_ok() {
                return Ok(candidate.to_string());
            }
        }
        anyhow::bail!("could not find main or master branch")
    }

    fn commit_history(&self, base: &str) -> Result<String> {
        let range = format!("{base}..HEAD");
        Ok(exec::run("git", &["log", "--pretty=format:%h %s", &range])?)
    }

    fn push(&self) -> Result<()> {
        match exec::run("git", &["push"]) {
            Ok(_) => Ok(()),
            Err(err) if is_no_upstream(&err) => {
                debug!("push rejected for missing upstream, retrying with --set-upstream");
                let branch = self.current_branch().context("push failed and could not get current branch")?;
                exec::run("git", &["push", "--set-upstream", "origin", &branch])?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn force_push(&self) -> Result<()> {
        match exec::run("git", &["push", "--force"]) {
            Ok(_) => Ok(()),
            Err(err) if is_no_upstream(&err) => {
                debug!("force push rejected for missing upstream, retrying with --set-upstream");
                let branch = self
                    .current_branch()
                    .context("force push failed and could not get current branch")?;
                exec::run("git", &["push", "--force", "--set-upstream", "origin", &branch])?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn detects_the_no_upstream_signal() {
        let err = exec::run(
            "sh",
            &[
                "-c",
                "echo 'fatal: The current branch topic has no upstream branch.' >&2; exit 128",
            ],
        )
        .unwrap_err();
        assert!(is_no_upstream(&err));

        let other = exec::run("sh", &["-c", "echo 'rejected (non-fast-forward)' >&2; exit 1"])
            .unwrap_err();
        assert!(!is_no_upstream(&other));
    }
}
