//! Workflow orchestration.
//!
//! Each subcommand maps to one short, deterministic pipeline over the three
//! ports: inspect git state, query the model, clean the response, apply the
//! result through git and (for pull requests) the review host. Every stage
//! failure aborts the pipeline immediately; the only retry anywhere is the
//! push → force-push escalation in the pull-request workflow.

use thiserror::Error;
use tracing::{debug, info};

use crate::claude::{prompts, response, LanguageModel};
use crate::git::SourceControl;
use crate::github::ReviewHost;

/// Errors produced by the workflows.
///
/// Underlying port errors are embedded in the message so the user can
/// diagnose failures without source access.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Nothing staged; `commit` refuses to query the model.
    #[error("no changes staged for commit")]
    NoStagedChanges,

    /// Nothing staged; `amend` refuses to query the model.
    #[error("no changes staged for amend")]
    NoStagedChangesForAmend,

    /// Neither `main` nor `master` could be resolved.
    #[error("could not resolve base branch: {0}")]
    NoBaseBranch(anyhow::Error),

    /// The current branch has no commits ahead of the base branch.
    #[error("no commits found between {base} and {branch}")]
    NoCommitsFound {
        /// Resolved base branch.
        base: String,
        /// Current branch.
        branch: String,
    },

    /// Both the plain push and the force-push attempt failed.
    #[error("failed to push branch: {push}; force push also failed: {force_push}")]
    PushFailed {
        /// Error from the plain push attempt.
        push: anyhow::Error,
        /// Error from the force-push attempt.
        force_push: anyhow::Error,
    },

    /// A model query failed.
    #[error("model query failed: {0}")]
    ModelQueryFailed(anyhow::Error),

    /// A git or review-host operation failed.
    #[error("{operation} failed: {cause}")]
    PortOperationFailed {
        /// The operation that failed.
        operation: &'static str,
        /// Underlying error, preserved verbatim.
        cause: anyhow::Error,
    },
}

/// How the pull-request workflow reconciled the remote PR state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrOutcome {
    /// No open PR existed; one was created.
    Created,
    /// An open PR existed; its title and description were updated.
    Updated,
}

fn port_failed(operation: &'static str) -> impl FnOnce(anyhow::Error) -> WorkflowError {
    move |cause| WorkflowError::PortOperationFailed { operation, cause }
}

/// Generates a commit message for the staged changes and commits them.
///
/// Returns the sanitized message that was committed.
pub async fn commit(
    model: &dyn LanguageModel,
    git: &dyn SourceControl,
) -> Result<String, WorkflowError> {
    let diff = git
        .staged_diff()
        .map_err(port_failed("reading staged changes"))?;
    if diff.trim().is_empty() {
        return Err(WorkflowError::NoStagedChanges);
    }

    debug!(diff_len = diff.len(), "querying model for commit message");
    let raw = model
        .query(&prompts::commit_message(&diff))
        .await
        .map_err(WorkflowError::ModelQueryFailed)?;
    let message = response::sanitize(&raw);

    git.commit(&message)
        .map_err(port_failed("committing staged changes"))?;
    info!("created commit");
    Ok(message)
}

/// Folds staged changes into HEAD with a regenerated message.
///
/// Returns the sanitized message HEAD now carries.
pub async fn amend(
    model: &dyn LanguageModel,
    git: &dyn SourceControl,
) -> Result<String, WorkflowError> {
    let diff = git
        .staged_diff()
        .map_err(port_failed("reading staged changes"))?;
    if diff.trim().is_empty() {
        return Err(WorkflowError::NoStagedChangesForAmend);
    }

    debug!(diff_len = diff.len(), "querying model for amended commit message");
    let raw = model
        .query(&prompts::commit_message(&diff))
        .await
        .map_err(WorkflowError::ModelQueryFailed)?;
    let message = response::sanitize(&raw);

    git.amend(&message)
        .map_err(port_failed("amending commit"))?;
    info!("amended HEAD");
    Ok(message)
}

/// Pushes the current branch and opens or updates its pull request.
///
/// Title and description are generated by two independent model queries
/// issued concurrently; each result is sanitized on its own. The push is
/// escalated to a force-push once on failure, and an already-open PR is
/// edited rather than duplicated.
pub async fn pull_request(
    model: &dyn LanguageModel,
    git: &dyn SourceControl,
    host: &dyn ReviewHost,
) -> Result<PrOutcome, WorkflowError> {
    let branch = git
        .current_branch()
        .map_err(port_failed("resolving current branch"))?;
    let base = git.base_branch().map_err(WorkflowError::NoBaseBranch)?;

    let history = git
        .commit_history(&base)
        .map_err(port_failed("reading commit history"))?;
    if history.trim().is_empty() {
        return Err(WorkflowError::NoCommitsFound { base, branch });
    }

    debug!(base = %base, branch = %branch, "querying model for PR title and description");
    let (raw_title, raw_description) = futures::future::try_join(
        model.query(&prompts::pr_title(&history)),
        model.query(&prompts::pr_description(&history)),
    )
    .await
    .map_err(WorkflowError::ModelQueryFailed)?;
    let title = response::sanitize(&raw_title);
    let description = response::sanitize(&raw_description);

    if let Err(push_err) = git.push() {
        debug!(error = %push_err, "push failed, attempting force push");
        if let Err(force_err) = git.force_push() {
            return Err(WorkflowError::PushFailed {
                push: push_err,
                force_push: force_err,
            });
        }
    }

    let open = host
        .has_open_pull_request()
        .map_err(port_failed("checking for an open pull request"))?;
    if open {
        host.edit_pull_request(&title, &description)
            .map_err(port_failed("editing pull request"))?;
        info!(branch = %branch, "updated existing pull request");
        Ok(PrOutcome::Updated)
    } else {
        host.create_pull_request(&title, &description)
            .map_err(port_failed("creating pull request"))?;
        info!(branch = %branch, "created pull request");
        Ok(PrOutcome::Created)
    }
}
