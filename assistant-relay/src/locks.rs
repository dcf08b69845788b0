//! Per-contact mutual exclusion: one turn at a time per contact, different contacts in parallel.

use dashmap::DashMap;
use relay_core::ContactId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<ContactId, Arc<Mutex<()>>>;

#[derive(Clone, Default)]
pub struct ContactLocks {
    inner: Arc<LockMap>,
}

impl ContactLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and holds the contact's lock until the guard is dropped.
    pub async fn lock(&self, contact: &ContactId) -> ContactGuard {
        // The map shard guard must be released before awaiting the mutex.
        let mutex = self
            .inner
            .entry(contact.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        ContactGuard {
            guard: Some(guard),
            locks: self.inner.clone(),
            contact: contact.clone(),
        }
    }

    /// Number of contacts with a turn in progress or waiting.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Held for the duration of a turn. Dropping it releases the contact and removes the map entry
/// when nobody else is holding or waiting on it.
pub struct ContactGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
    contact: ContactId,
}

impl Drop for ContactGuard {
    fn drop(&mut self) {
        // The guard owns a clone of the mutex Arc; release it before counting.
        drop(self.guard.take());
        self.locks
            .remove_if(&self.contact, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
