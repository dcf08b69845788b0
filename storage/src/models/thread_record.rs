//! Thread mapping record.
//!
//! Maps to the `threads` table and is used by ThreadRepository.

use chrono::{DateTime, Utc};
use relay_core::{ContactId, ConversationHandle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ThreadRecord {
    pub wa_id: String,
    pub thread_id: String,
    pub updated_at: DateTime<Utc>,
}

impl ThreadRecord {
    /// Creates a record stamped with the current time.
    pub fn new(contact: &ContactId, handle: &ConversationHandle) -> Self {
        Self {
            wa_id: contact.as_str().to_string(),
            thread_id: handle.as_str().to_string(),
            updated_at: Utc::now(),
        }
    }

    pub fn handle(&self) -> ConversationHandle {
        ConversationHandle::new(self.thread_id.clone())
    }
}
