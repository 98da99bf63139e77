//! CLI interface for git-quill.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::claude::ClaudeClient;
use crate::git::GitCli;
use crate::github::GhCli;
use crate::utils::spinner::with_spinner;
use crate::workflow::{self, PrOutcome};

/// git-quill: AI-assisted commit messages and pull requests.
#[derive(Parser)]
#[command(name = "git-quill")]
#[command(about = "AI-assisted commit messages and pull requests for git", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generates a commit message for staged changes and commits them.
    Commit(CommitCommand),
    /// Folds staged changes into HEAD with a regenerated message.
    Amend(AmendCommand),
    /// Pushes the current branch and opens or updates its pull request.
    Pr(PrCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commit(cmd) => cmd.execute().await,
            Commands::Amend(cmd) => cmd.execute().await,
            Commands::Pr(cmd) => cmd.execute().await,
        }
    }
}

/// Commit command options.
#[derive(Parser)]
pub struct CommitCommand {
    /// Claude model to use (defaults to claude-3-7-sonnet-latest).
    #[arg(long)]
    pub model: Option<String>,
}

impl CommitCommand {
    /// Executes the commit command.
    pub async fn execute(self) -> Result<()> {
        let model = ClaudeClient::from_env(self.model)?;
        let git = GitCli::new()?;

        let message =
            with_spinner("Generating commit message", workflow::commit(&model, &git)).await?;
        println!("Committed with message:\n\n{message}");
        Ok(())
    }
}

/// Amend command options.
#[derive(Parser)]
pub struct AmendCommand {
    /// Claude model to use (defaults to claude-3-7-sonnet-latest).
    #[arg(long)]
    pub model: Option<String>,
}

impl AmendCommand {
    /// Executes the amend command.
    pub async fn execute(self) -> Result<()> {
        let model = ClaudeClient::from_env(self.model)?;
        let git = GitCli::new()?;

        let message =
            with_spinner("Amending commit", workflow::amend(&model, &git)).await?;
        println!("Amended HEAD with message:\n\n{message}");
        Ok(())
    }
}

/// PR command options.
#[derive(Parser)]
pub struct PrCommand {
    /// Claude model to use (defaults to claude-3-7-sonnet-latest).
    #[arg(long)]
    pub model: Option<String>,
}

impl PrCommand {
    /// Executes the pr command.
    pub async fn execute(self) -> Result<()> {
        let model = ClaudeClient::from_env(self.model)?;
        let git = GitCli::new()?;
        let host = GhCli::new()?;

        let outcome = with_spinner(
            "Preparing pull request",
            workflow::pull_request(&model, &git, &host),
        )
        .await?;
        match outcome {
            PrOutcome::Created => println!("Opened pull request"),
            PrOutcome::Updated => println!("Updated existing pull request"),
        }
        Ok(())
    }
}
