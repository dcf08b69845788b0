//! # assistant-relay
//!
//! Turns one inbound contact message into one assistant reply:
//!
//! - [`ConversationResolver`] maps a contact to a live upstream thread, recreating it when the
//!   stored one is gone upstream.
//! - [`ReplyPoller`] submits the message, starts a run and polls it with a bounded budget on an
//!   injected [`Clock`].
//! - [`MessageOrchestrator`] composes both and serializes turns per contact via [`ContactLocks`].

pub mod clock;
pub mod locks;
pub mod orchestrator;
pub mod poller;
pub mod resolver;

pub use clock::{Clock, ManualClock, TokioClock};
pub use locks::{ContactGuard, ContactLocks};
pub use orchestrator::MessageOrchestrator;
pub use poller::{PollSettings, ReplyOutcome, ReplyPoller};
pub use resolver::ConversationResolver;

use openai_assistant::AssistantError;
use relay_core::RelayError;

/// Maps an upstream failure (other than a handled not-found) into the shared error type.
pub(crate) fn upstream_error(e: AssistantError) -> RelayError {
    RelayError::Assistant(e.to_string())
}
