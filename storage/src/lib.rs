//! Storage crate: durable mapping from WhatsApp contact to assistant thread.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ThreadRecord
//! - [`repository`] – ConversationStore trait
//! - [`thread_repo`] – ThreadRepository (SQLite)
//! - [`inmemory_store`] – InMemoryConversationStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod inmemory_store;
mod models;
mod repository;
mod sqlite_pool;
mod thread_repo;

pub use error::StorageError;
pub use inmemory_store::InMemoryConversationStore;
pub use models::ThreadRecord;
pub use repository::ConversationStore;
pub use sqlite_pool::SqlitePoolManager;
pub use thread_repo::ThreadRepository;
