//! Assistant configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

/// Fallback reply when the run does not complete within the budget.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Desculpe, não consegui processar sua solicitação a tempo.";

/// Assistant configuration interface for OpenAI-compatible Assistants APIs.
pub trait AssistantConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn assistant_id(&self) -> &str;
    fn poll_interval(&self) -> Duration;
    fn reply_timeout(&self) -> Duration;
    fn fallback_message(&self) -> &str;
}

/// Assistant config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvAssistantConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub assistant_id: String,
    pub poll_interval_ms: u64,
    pub reply_timeout_secs: u64,
    pub fallback_message: String,
}

impl AssistantConfig for EnvAssistantConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn assistant_id(&self) -> &str {
        &self.assistant_id
    }
    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
    fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
    fn fallback_message(&self) -> &str {
        &self.fallback_message
    }
}

impl EnvAssistantConfig {
    /// Load from environment variables. `OPENAI_API_KEY` and `OPENAI_ASSISTANT_ID` are required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let assistant_id =
            env::var("OPENAI_ASSISTANT_ID").context("OPENAI_ASSISTANT_ID not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let poll_interval_ms = env_u64("POLL_INTERVAL_MS", 500)?;
        let reply_timeout_secs = env_u64("REPLY_TIMEOUT_SECS", 30)?;
        let fallback_message = env::var("FALLBACK_MESSAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string());

        Ok(Self {
            openai_api_key,
            openai_base_url,
            assistant_id,
            poll_interval_ms,
            reply_timeout_secs,
            fallback_message,
        })
    }

    /// Validate values that cannot be checked at parse time.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        if self.assistant_id.trim().is_empty() {
            anyhow::bail!("OPENAI_ASSISTANT_ID is empty");
        }
        if reqwest::Url::parse(&self.openai_base_url).is_err() {
            anyhow::bail!("OPENAI_BASE_URL is not a valid URL: {}", self.openai_base_url);
        }
        if self.poll_interval_ms == 0 {
            anyhow::bail!("POLL_INTERVAL_MS must be greater than zero");
        }
        if self.reply_timeout_secs == 0 {
            anyhow::bail!("REPLY_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}

/// Unset means `default`; a value that is set must parse.
fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(s) => s
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, s)),
        Err(_) => Ok(default),
    }
}
