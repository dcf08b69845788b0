//! Submit a message, run the assistant and wait (bounded) for its reply.

use openai_assistant::{AssistantApi, AssistantConfig, RunStatus, DEFAULT_FALLBACK_MESSAGE};
use relay_core::{ConversationHandle, RelayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::clock::Clock;
use crate::upstream_error;

/// Polling cadence, budget and the text returned when the budget runs out.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
    pub fallback_message: String,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl PollSettings {
    pub fn from_config(config: &dyn AssistantConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            timeout: config.reply_timeout(),
            fallback_message: config.fallback_message().to_string(),
        }
    }
}

/// How a run ended from the poller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Run completed; carries the assistant's reply text.
    Completed(String),
    /// Budget exhausted before `completed` was observed. The run is left running upstream.
    TimedOut { last_status: RunStatus },
    /// Run reached a terminal status other than `completed`.
    Ended { status: RunStatus },
}

impl ReplyOutcome {
    /// Reply text for the user: the generated text, or `fallback` for every other outcome.
    pub fn into_text(self, fallback: &str) -> String {
        match self {
            ReplyOutcome::Completed(text) => text,
            ReplyOutcome::TimedOut { .. } | ReplyOutcome::Ended { .. } => fallback.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ReplyPoller {
    api: Arc<dyn AssistantApi>,
    clock: Arc<dyn Clock>,
    assistant_id: String,
    settings: PollSettings,
}

impl ReplyPoller {
    pub fn new(
        api: Arc<dyn AssistantApi>,
        clock: Arc<dyn Clock>,
        assistant_id: impl Into<String>,
        settings: PollSettings,
    ) -> Self {
        Self {
            api,
            clock,
            assistant_id: assistant_id.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Returns the assistant's reply, or the configured fallback text if none arrives in time.
    pub async fn await_reply(&self, handle: &ConversationHandle, text: &str) -> Result<String> {
        let outcome = self.run_turn(handle, text).await?;
        Ok(outcome.into_text(&self.settings.fallback_message))
    }

    /// Appends `text` as a user message, starts a run and polls it until it ends or the budget runs out.
    ///
    /// Upstream errors (message append, run creation, status retrieval, reply listing) propagate.
    #[instrument(skip(self, text), fields(thread_id = %handle))]
    pub async fn run_turn(&self, handle: &ConversationHandle, text: &str) -> Result<ReplyOutcome> {
        let thread_id = handle.as_str();

        self.api
            .create_user_message(thread_id, text)
            .await
            .map_err(upstream_error)?;

        info!(assistant_id = %self.assistant_id, "Starting run");
        let mut run = self
            .api
            .create_run(thread_id, &self.assistant_id)
            .await
            .map_err(upstream_error)?;
        info!(run_id = %run.id, status = %run.status, "Run created");

        let started = self.clock.now();
        loop {
            match run.status {
                RunStatus::Completed => break,
                status if status.is_terminal() => {
                    match &run.last_error {
                        Some(e) => warn!(
                            run_id = %run.id,
                            status = %status,
                            code = %e.code,
                            message = %e.message,
                            "Run ended without completing"
                        ),
                        None => warn!(run_id = %run.id, status = %status, "Run ended without completing"),
                    }
                    return Ok(ReplyOutcome::Ended { status });
                }
                _ => {}
            }

            let elapsed = self.clock.now().saturating_sub(started);
            if elapsed >= self.settings.timeout {
                error!(
                    run_id = %run.id,
                    last_status = %run.status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Timeout waiting for run"
                );
                return Ok(ReplyOutcome::TimedOut {
                    last_status: run.status,
                });
            }

            self.clock.sleep(self.settings.interval).await;
            run = self
                .api
                .retrieve_run(thread_id, &run.id)
                .await
                .map_err(upstream_error)?;
            info!(run_id = %run.id, status = %run.status, "Run status");
        }

        let message = self
            .api
            .latest_message(thread_id)
            .await
            .map_err(upstream_error)?
            .ok_or_else(|| RelayError::Assistant(format!("Thread {} has no messages", thread_id)))?;

        if message.role != "assistant" {
            return Err(RelayError::Assistant(format!(
                "Latest message {} on thread {} is not from the assistant",
                message.id, thread_id
            )));
        }

        let reply = message.text().ok_or_else(|| {
            RelayError::Assistant(format!("Message {} has no text content", message.id))
        })?;
        info!(message_id = %message.id, reply_len = reply.len(), "Generated message");

        Ok(ReplyOutcome::Completed(reply.to_string()))
    }
}
