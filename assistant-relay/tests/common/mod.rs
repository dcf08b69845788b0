//! Test doubles for the assistant service and the conversation store.
//!
//! [`MockAssistant`] keeps its threads, runs and messages in memory and replays a run-status
//! script for every run, so tests can drive the poller through any status sequence without a
//! network. [`CountingStore`] wraps the in-memory store and counts writes.

#![allow(dead_code)]

use async_trait::async_trait;
use openai_assistant::{
    Assistant, AssistantApi, AssistantError, LastError, MessageContent, Run, RunStatus,
    TextContent, Thread, ThreadMessage,
};
use relay_core::{ContactId, ConversationHandle};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use storage::{ConversationStore, InMemoryConversationStore, StorageError};

pub const ASSISTANT_ID: &str = "asst_test";

/// One recorded `create_user_message(thread_id, content)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedMessage {
    pub thread_id: String,
    pub content: String,
}

struct RunState {
    thread_id: String,
    step: usize,
}

/// In-memory stand-in for the assistant service.
pub struct MockAssistant {
    threads: Mutex<HashSet<String>>,
    runs: Mutex<HashMap<String, RunState>>,
    /// Threads with a run that has not been observed finishing yet.
    active_runs: Mutex<HashSet<String>>,
    script: Vec<RunStatus>,
    reply_role: String,
    reply_text: Option<String>,
    no_messages: bool,
    retrieve_thread_error: Option<u16>,
    create_run_error: Option<u16>,
    pub appended: Mutex<Vec<AppendedMessage>>,
    pub create_thread_calls: AtomicUsize,
    pub retrieve_thread_calls: AtomicUsize,
    pub create_run_calls: AtomicUsize,
    pub retrieve_run_calls: AtomicUsize,
    pub latest_message_calls: AtomicUsize,
    /// Set when a message is appended to a thread whose run is still active.
    pub overlap_detected: AtomicBool,
    next_id: AtomicUsize,
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAssistant {
    /// Every run completes immediately and the reply is `"Hello from the assistant"`.
    pub fn new() -> Self {
        Self {
            threads: Mutex::new(HashSet::new()),
            runs: Mutex::new(HashMap::new()),
            active_runs: Mutex::new(HashSet::new()),
            script: vec![RunStatus::Completed],
            reply_role: "assistant".to_string(),
            reply_text: Some("Hello from the assistant".to_string()),
            no_messages: false,
            retrieve_thread_error: None,
            create_run_error: None,
            appended: Mutex::new(Vec::new()),
            create_thread_calls: AtomicUsize::new(0),
            retrieve_thread_calls: AtomicUsize::new(0),
            create_run_calls: AtomicUsize::new(0),
            retrieve_run_calls: AtomicUsize::new(0),
            latest_message_calls: AtomicUsize::new(0),
            overlap_detected: AtomicBool::new(false),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Threads that exist upstream before the test starts.
    pub fn with_threads(self, ids: &[&str]) -> Self {
        {
            let mut threads = self.threads.lock().unwrap();
            threads.extend(ids.iter().map(|id| id.to_string()));
        }
        self
    }

    /// Statuses every run goes through: `create_run` returns the first, each `retrieve_run`
    /// advances one step and the last status repeats.
    pub fn with_script(mut self, script: Vec<RunStatus>) -> Self {
        assert!(!script.is_empty());
        self.script = script;
        self
    }

    pub fn with_reply(mut self, text: &str) -> Self {
        self.reply_text = Some(text.to_string());
        self
    }

    pub fn with_reply_role(mut self, role: &str) -> Self {
        self.reply_role = role.to_string();
        self
    }

    /// Latest message carries no text part.
    pub fn with_non_text_reply(mut self) -> Self {
        self.reply_text = None;
        self
    }

    pub fn with_no_messages(mut self) -> Self {
        self.no_messages = true;
        self
    }

    /// `retrieve_thread` fails with this HTTP status instead of looking the thread up.
    pub fn with_retrieve_thread_error(mut self, status: u16) -> Self {
        self.retrieve_thread_error = Some(status);
        self
    }

    pub fn with_create_run_error(mut self, status: u16) -> Self {
        self.create_run_error = Some(status);
        self
    }

    pub fn thread_exists(&self, id: &str) -> bool {
        self.threads.lock().unwrap().contains(id)
    }

    pub fn appended(&self) -> Vec<AppendedMessage> {
        self.appended.lock().unwrap().clone()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn next(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn status_at(&self, step: usize) -> RunStatus {
        self.script[step.min(self.script.len() - 1)]
    }

    fn run(&self, id: &str, thread_id: &str, status: RunStatus) -> Run {
        let last_error = matches!(status, RunStatus::Failed).then(|| LastError {
            code: "server_error".to_string(),
            message: "Something went wrong".to_string(),
        });
        if status.is_terminal() {
            self.active_runs.lock().unwrap().remove(thread_id);
        }
        Run {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: Some(ASSISTANT_ID.to_string()),
            status,
            last_error,
        }
    }

    fn missing(resource: &str, id: &str) -> AssistantError {
        AssistantError::NotFound {
            resource: resource.to_string(),
            message: format!("No {} found with id '{}'.", resource, id),
        }
    }
}

#[async_trait]
impl AssistantApi for MockAssistant {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant, AssistantError> {
        if assistant_id != ASSISTANT_ID {
            return Err(Self::missing("assistant", assistant_id));
        }
        Ok(Assistant {
            id: assistant_id.to_string(),
            name: Some("Test assistant".to_string()),
            model: Some("gpt-4o".to_string()),
        })
    }

    async fn create_thread(&self) -> Result<Thread, AssistantError> {
        self.create_thread_calls.fetch_add(1, Ordering::SeqCst);
        // Give concurrent turns a chance to interleave here.
        tokio::task::yield_now().await;
        let id = self.next("thread");
        self.threads.lock().unwrap().insert(id.clone());
        Ok(Thread {
            id,
            created_at: Some(1_700_000_000),
        })
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread, AssistantError> {
        self.retrieve_thread_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.retrieve_thread_error {
            return Err(AssistantError::Api {
                status,
                message: "upstream unavailable".to_string(),
            });
        }
        if !self.thread_exists(thread_id) {
            return Err(Self::missing("thread", thread_id));
        }
        Ok(Thread {
            id: thread_id.to_string(),
            created_at: None,
        })
    }

    async fn create_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError> {
        if !self.thread_exists(thread_id) {
            return Err(Self::missing("thread", thread_id));
        }
        if self.active_runs.lock().unwrap().contains(thread_id) {
            self.overlap_detected.store(true, Ordering::SeqCst);
        }
        self.appended.lock().unwrap().push(AppendedMessage {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
        });
        Ok(ThreadMessage {
            id: self.next("msg"),
            role: "user".to_string(),
            content: vec![MessageContent::Text {
                text: TextContent {
                    value: content.to_string(),
                },
            }],
            run_id: None,
        })
    }

    async fn create_run(&self, thread_id: &str, _assistant_id: &str) -> Result<Run, AssistantError> {
        self.create_run_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.create_run_error {
            return Err(AssistantError::Api {
                status,
                message: "run rejected".to_string(),
            });
        }
        let id = self.next("run");
        self.runs.lock().unwrap().insert(
            id.clone(),
            RunState {
                thread_id: thread_id.to_string(),
                step: 0,
            },
        );
        self.active_runs.lock().unwrap().insert(thread_id.to_string());
        Ok(self.run(&id, thread_id, self.status_at(0)))
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        self.retrieve_run_calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut runs = self.runs.lock().unwrap();
            let state = runs
                .get_mut(run_id)
                .filter(|s| s.thread_id == thread_id)
                .ok_or_else(|| Self::missing("run", run_id))?;
            state.step += 1;
            state.step
        };
        Ok(self.run(run_id, thread_id, self.status_at(step)))
    }

    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, AssistantError> {
        self.latest_message_calls.fetch_add(1, Ordering::SeqCst);
        if self.no_messages {
            return Ok(None);
        }
        let content = match &self.reply_text {
            Some(text) => vec![MessageContent::Text {
                text: TextContent {
                    value: text.clone(),
                },
            }],
            None => vec![MessageContent::Other],
        };
        Ok(Some(ThreadMessage {
            id: format!("msg_reply_{}", thread_id),
            role: self.reply_role.clone(),
            content,
            run_id: None,
        }))
    }
}

/// In-memory store that counts writes and can be made to fail lookups.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryConversationStore,
    pub store_calls: AtomicUsize,
    pub fail_lookup: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, contact: &str, thread_id: &str) {
        self.inner
            .store(&ContactId::from(contact), &ConversationHandle::from(thread_id))
            .await
            .unwrap();
    }

    pub async fn get(&self, contact: &str) -> Option<ConversationHandle> {
        self.inner.lookup(&ContactId::from(contact)).await.unwrap()
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    pub fn store_count(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConversationStore for CountingStore {
    async fn lookup(&self, contact: &ContactId) -> Result<Option<ConversationHandle>, StorageError> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        self.inner.lookup(contact).await
    }

    async fn store(
        &self,
        contact: &ContactId,
        handle: &ConversationHandle,
    ) -> Result<(), StorageError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.store(contact, handle).await
    }
}
