//! Review host backed by the GitHub CLI.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::ReviewHost;
use crate::utils::exec;

/// [`ReviewHost`] implementation that shells out to `gh`.
pub struct GhCli(());

impl GhCli {
    /// Creates the implementation, verifying that `gh` is available.
    pub fn new() -> Result<Self> {
        exec::run("gh", &["--version"])
            .context("GitHub CLI (gh) is not installed or not found in PATH")?;
        Ok(Self(()))
    }
}

/// Subset of `gh pr view --json state` output.
#[derive(Deserialize)]
struct PrView {
    state: String,
}

impl ReviewHost for GhCli {
    fn create_pull_request(&self, title: &str, description: &str) -> Result<()> {
        let output = exec::run(
            "gh",
            &["pr", "create", "--title", title, "--body", description],
        )
        .context("failed to create pull request")?;
        // gh prints the new PR's URL
        print!("{output}");
        Ok(())
    }

    fn edit_pull_request(&self, title: &str, description: &str) -> Result<()> {
        let output = exec::run(
            "gh",
            &["pr", "edit", "--title", title, "--body", description],
        )
        .context("failed to edit pull request")?;
        print!("{output}");
        Ok(())
    }

    fn has_open_pull_request(&self) -> Result<bool> {
        match exec::run("gh", &["pr", "view", "--json", "state"]) {
            Ok(output) => {
                let view: PrView = serde_json::from_str(output.trim())
                    .context("unexpected `gh pr view` output")?;
                Ok(view.state == "OPEN")
            }
            // gh exits non-zero when the branch has no PR at all
            Err(err) if err.output().contains("no pull requests found") => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pr_view_state() {
        let view: PrView = serde_json::from_str(r#"{"state":"OPEN"}"#).unwrap();
        assert_eq!(view.state, "OPEN");

        // extra fields from gh are ignored
        let merged: PrView = serde_json::from_str(r#"{"state":"MERGED","number":12}"#).unwrap();
        assert_eq!(merged.state, "MERGED");
    }
}
