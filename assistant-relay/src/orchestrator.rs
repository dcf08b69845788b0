//! End-to-end turn: contact message in, reply text out.

use relay_core::{ContactId, Result};
use tracing::{info, instrument};

use crate::locks::ContactLocks;
use crate::poller::ReplyPoller;
use crate::resolver::ConversationResolver;

/// Resolves the contact's thread and awaits the reply, one turn at a time per contact.
///
/// The per-contact lock covers resolve + store + submit + poll, so two deliveries from the same
/// contact can neither create two threads nor add a message while a run is still active.
#[derive(Clone)]
pub struct MessageOrchestrator {
    resolver: ConversationResolver,
    poller: ReplyPoller,
    locks: ContactLocks,
}

impl MessageOrchestrator {
    pub fn new(resolver: ConversationResolver, poller: ReplyPoller) -> Self {
        Self {
            resolver,
            poller,
            locks: ContactLocks::new(),
        }
    }

    #[instrument(skip(self, text), fields(wa_id = %contact))]
    pub async fn handle_inbound(&self, contact: &ContactId, name: &str, text: &str) -> Result<String> {
        let _turn = self.locks.lock(contact).await;

        let handle = self.resolver.resolve(contact, name).await?;
        let reply = self.poller.await_reply(&handle, text).await?;

        info!(name = %name, thread_id = %handle, reply = %reply, "Reply ready");
        Ok(reply)
    }
}
