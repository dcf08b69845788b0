//! Contact → live assistant thread resolution.

use openai_assistant::AssistantApi;
use relay_core::{ContactId, ConversationHandle, Result};
use std::sync::Arc;
use storage::ConversationStore;
use tracing::{info, instrument, warn};

use crate::upstream_error;

/// Produces a usable thread for a contact.
///
/// A stored thread that the upstream reports as not found is replaced by a new one, which is
/// persisted before being returned. Any other upstream or storage failure propagates.
/// Callers serialize per contact (see [`crate::ContactLocks`]).
#[derive(Clone)]
pub struct ConversationResolver {
    api: Arc<dyn AssistantApi>,
    store: Arc<dyn ConversationStore>,
}

impl ConversationResolver {
    pub fn new(api: Arc<dyn AssistantApi>, store: Arc<dyn ConversationStore>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self), fields(wa_id = %contact))]
    pub async fn resolve(&self, contact: &ContactId, name: &str) -> Result<ConversationHandle> {
        if let Some(handle) = self.store.lookup(contact).await? {
            info!(name = %name, thread_id = %handle, "Retrieving existing thread");
            match self.api.retrieve_thread(handle.as_str()).await {
                Ok(_) => return Ok(handle),
                Err(e) if e.is_not_found() => {
                    warn!(
                        thread_id = %handle,
                        "Thread not found upstream, creating a new one"
                    );
                }
                Err(e) => return Err(upstream_error(e)),
            }
        }

        info!(name = %name, "Creating new thread");
        let thread = self.api.create_thread().await.map_err(upstream_error)?;
        let handle = ConversationHandle::new(thread.id);
        self.store.store(contact, &handle).await?;

        Ok(handle)
    }
}
