//! # OpenAI Assistants API client
//!
//! Thin HTTP client for the Assistants (v2) endpoints used by the relay: threads, thread
//! messages and runs. Defines the [`AssistantApi`] trait so callers can inject a mock, and
//! [`AssistantError::NotFound`] so a stale thread id is distinguishable from other failures.
//! Provides token masking for safe logging.

use async_trait::async_trait;

mod client;
mod config;
mod error;
mod types;

pub use client::{OpenAIAssistantClient, DEFAULT_BASE_URL};
pub use config::{AssistantConfig, EnvAssistantConfig, DEFAULT_FALLBACK_MESSAGE};
pub use error::AssistantError;
pub use types::{
    Assistant, LastError, MessageContent, Run, RunStatus, TextContent, Thread, ThreadMessage,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Remote operations of the assistant service, treated as opaque calls by the relay.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Fetches the assistant definition (used to validate the configured id).
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant, AssistantError>;

    /// Creates a new empty thread.
    async fn create_thread(&self) -> Result<Thread, AssistantError>;

    /// Fetches a thread. Returns [`AssistantError::NotFound`] when the id is unknown upstream.
    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread, AssistantError>;

    /// Appends a user-authored text message to a thread.
    async fn create_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError>;

    /// Starts a run of the assistant on the thread.
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError>;

    /// Fetches the current state of a run.
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError>;

    /// Returns the most recent message on the thread, if any.
    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, AssistantError>;
}
