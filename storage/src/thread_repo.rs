//! Thread repository: persistence of the contact → assistant thread mapping.
//!
//! Uses SqlitePoolManager and the ThreadRecord model.
//! External: SQLite via sqlx; callers use the [`ConversationStore`] trait (lookup/store).

use async_trait::async_trait;
use relay_core::{ContactId, ConversationHandle};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::ThreadRecord;
use crate::repository::ConversationStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ThreadRepository {
    pool_manager: SqlitePoolManager,
}

impl ThreadRepository {
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating threads table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS threads (
                wa_id TEXT PRIMARY KEY,
                thread_id TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Returns the full record (with last update time) for a contact.
    pub async fn get_record(&self, contact: &ContactId) -> Result<Option<ThreadRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, ThreadRecord>(
            "SELECT wa_id, thread_id, updated_at FROM threads WHERE wa_id = ?",
        )
        .bind(contact.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Number of contacts with a stored thread.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM threads")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ConversationStore for ThreadRepository {
    async fn lookup(&self, contact: &ContactId) -> Result<Option<ConversationHandle>, StorageError> {
        let record = self.get_record(contact).await?;

        debug!(wa_id = %contact, found = record.is_some(), "Thread lookup");
        Ok(record.map(|r| r.handle()))
    }

    async fn store(
        &self,
        contact: &ContactId,
        handle: &ConversationHandle,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();
        let record = ThreadRecord::new(contact, handle);

        sqlx::query(
            r#"
            INSERT INTO threads (wa_id, thread_id, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(wa_id) DO UPDATE SET
                thread_id = excluded.thread_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.wa_id)
        .bind(&record.thread_id)
        .bind(record.updated_at)
        .execute(pool)
        .await?;

        info!(wa_id = %contact, thread_id = %handle, "Stored thread");
        Ok(())
    }
}
