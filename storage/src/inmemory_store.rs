//! In-memory conversation store for tests and ephemeral runs. Data is lost on restart.

use async_trait::async_trait;
use relay_core::{ContactId, ConversationHandle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::repository::ConversationStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    entries: Arc<RwLock<HashMap<ContactId, ConversationHandle>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored contacts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn lookup(&self, contact: &ContactId) -> Result<Option<ConversationHandle>, StorageError> {
        Ok(self.entries.read().await.get(contact).cloned())
    }

    async fn store(
        &self,
        contact: &ContactId,
        handle: &ConversationHandle,
    ) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(contact.clone(), handle.clone());
        Ok(())
    }
}
