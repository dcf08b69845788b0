use async_trait::async_trait;
use relay_core::{ContactId, ConversationHandle};

use crate::error::StorageError;

/// Durable mapping ContactId → ConversationHandle.
///
/// At most one handle per contact; `store` is an upsert (last writer wins). Entries are never deleted.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the stored handle for the contact, if any. No side effects.
    async fn lookup(&self, contact: &ContactId) -> Result<Option<ConversationHandle>, StorageError>;

    /// Inserts or overwrites the handle for the contact.
    async fn store(
        &self,
        contact: &ContactId,
        handle: &ConversationHandle,
    ) -> Result<(), StorageError>;
}
