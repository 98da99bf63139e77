//! Terminal spinner for long-running operations.
//!
//! Purely cosmetic: the spinner runs as a separate tokio task that is
//! aborted as soon as the wrapped future resolves, and it holds no state
//! the caller depends on.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Runs `task` to completion while animating `message` on stderr.
///
/// The animation is skipped entirely when stderr is not a terminal, so
/// piped and scripted invocations see clean output.
pub async fn with_spinner<T>(message: &str, task: impl Future<Output = T>) -> T {
    if !io::stderr().is_terminal() {
        return task.await;
    }

    let message = message.to_string();
    let spinner = tokio::spawn(async move {
        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        for frame in FRAMES.iter().cycle() {
            interval.tick().await;
            eprint!("\r{frame} {message}");
            let _ = io::stderr().flush();
        }
    });

    let result = task.await;

    spinner.abort();
    let mut stderr = io::stderr();
    let _ = stderr
        .execute(cursor::MoveToColumn(0))
        .and_then(|s| s.execute(Clear(ClearType::CurrentLine)));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_wrapped_value() {
        let value = with_spinner("working", async { 41 + 1 }).await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn propagates_errors_from_the_wrapped_future() {
        let result: anyhow::Result<()> =
            with_spinner("working", async { anyhow::bail!("boom") }).await;
        assert!(result.is_err());
    }
}
