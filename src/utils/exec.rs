//! External process invocation.
//!
//! Thin wrapper around [`std::process::Command`] that captures output in a
//! form callers can pattern-match on: stdout on success, combined
//! stdout/stderr inside the error on failure. Both `git` and `gh` report
//! recognizable conditions ("has no upstream branch", "no pull requests
//! found") through their output rather than distinct exit codes.

use std::process::Command;

use thiserror::Error;

/// A failed external command, retaining everything it printed.
#[derive(Debug, Error)]
#[error("`{command}` failed ({status}): {output}")]
pub struct CommandError {
    command: String,
    status: String,
    output: String,
}

impl CommandError {
    /// Combined stdout/stderr captured from the failed command.
    pub fn output(&self) -> &str {
        &self.output
    }
}

/// Runs a command to completion and returns its stdout.
///
/// On a non-zero exit the returned [`CommandError`] carries the combined
/// stdout/stderr so callers can inspect the failure text. A command that
/// could not be spawned at all yields an error with empty output.
pub fn run(program: &str, args: &[&str]) -> Result<String, CommandError> {
    let command = format!("{program} {}", args.join(" "));
    tracing::debug!(command = %command, "running external command");

    let output = Command::new(program).args(args).output().map_err(|e| CommandError {
        command: command.clone(),
        status: e.to_string(),
        output: String::new(),
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::debug!(command = %command, status = %output.status, "external command failed");
        Err(CommandError {
            command,
            status: output.status.to_string(),
            output: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn run_returns_stdout_on_success() {
        let out = run("sh", &["-c", "echo hello"]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    #[cfg(unix)]
    fn run_captures_stderr_in_error_output() {
        let err = run("sh", &["-c", "echo oops >&2; exit 3"]).unwrap_err();
        assert!(err.output().contains("oops"));
        assert!(err.to_string().contains("sh -c"));
    }

    #[test]
    fn run_reports_missing_program() {
        let err = run("definitely-not-a-real-binary-4b1d", &[]).unwrap_err();
        assert!(err.output().is_empty());
    }
}
