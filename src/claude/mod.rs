//! Language-model integration.
//!
//! The [`LanguageModel`] trait is the seam between the workflows and the
//! model provider: workflows submit a free-text prompt and get back a
//! free-text completion. [`ClaudeClient`] is the production implementation
//! backed by the Anthropic Messages API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Result;

pub mod client;
pub mod error;
pub mod prompts;
pub mod response;

pub use client::ClaudeClient;
pub use error::ClaudeError;

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Trait for language-model clients.
pub trait LanguageModel: Send + Sync {
    /// Submits a prompt and returns the model's free-text completion.
    fn query<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}
