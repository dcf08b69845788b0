//! Test doubles for webhook tests: an assistant that answers immediately and a messenger that
//! records what would have been sent to WhatsApp.

#![allow(dead_code)]

use assistant_relay::ManualClock;
use async_trait::async_trait;
use openai_assistant::{
    Assistant, AssistantApi, AssistantError, EnvAssistantConfig, MessageContent, Run, RunStatus,
    TextContent, Thread, ThreadMessage,
};
use relay_core::{ContactId, Messenger, RelayError, Result as RelayResult};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use storage::InMemoryConversationStore;
use whatsapp_bot::{assemble, AppState, BotComponents};

pub const ASSISTANT_ID: &str = "asst_test";
pub const VERIFY_TOKEN: &str = "verify-me";

/// Assistant whose runs complete at creation with a fixed reply.
pub struct InstantAssistant {
    reply: String,
    threads: AtomicUsize,
    pub fail_runs: AtomicBool,
    pub messages: Mutex<Vec<(String, String)>>,
}

impl InstantAssistant {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            threads: AtomicUsize::new(0),
            fail_runs: AtomicBool::new(false),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn threads_created(&self) -> usize {
        self.threads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssistantApi for InstantAssistant {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant, AssistantError> {
        Ok(Assistant {
            id: assistant_id.to_string(),
            name: None,
            model: None,
        })
    }

    async fn create_thread(&self) -> Result<Thread, AssistantError> {
        let n = self.threads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Thread {
            id: format!("thread_{}", n),
            created_at: None,
        })
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread, AssistantError> {
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
        self.messages
            .lock()
            .unwrap()
            .push((thread_id.to_string(), content.to_string()));
        Ok(ThreadMessage {
            id: "msg_user".to_string(),
            role: "user".to_string(),
            content: vec![],
            run_id: None,
        })
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError> {
        if self.fail_runs.load(Ordering::SeqCst) {
            return Err(AssistantError::Api {
                status: 500,
                message: "The server had an error while processing your request.".to_string(),
            });
        }
        Ok(Run {
            id: "run_1".to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: Some(assistant_id.to_string()),
            status: RunStatus::Completed,
            last_error: None,
        })
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        Ok(Run {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: None,
            status: RunStatus::Completed,
            last_error: None,
        })
    }

    async fn latest_message(&self, _thread_id: &str) -> Result<Option<ThreadMessage>, AssistantError> {
        Ok(Some(ThreadMessage {
            id: "msg_reply".to_string(),
            role: "assistant".to_string(),
            content: vec![MessageContent::Text {
                text: TextContent {
                    value: self.reply.clone(),
                },
            }],
            run_id: Some("run_1".to_string()),
        }))
    }
}

/// Records every send; can be switched to fail.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<(ContactId, String)>>,
    pub fail: AtomicBool,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<(ContactId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, to: &ContactId, text: &str) -> RelayResult<()> {
        self.sent.lock().unwrap().push((to.clone(), text.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(RelayError::Send("Graph API error (status 401)".to_string()));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub assistant: Arc<InstantAssistant>,
    pub messenger: Arc<RecordingMessenger>,
    pub store: Arc<InMemoryConversationStore>,
    pub components: BotComponents,
}

impl TestApp {
    pub fn new(reply: &str) -> Self {
        let assistant = Arc::new(InstantAssistant::new(reply));
        let messenger = Arc::new(RecordingMessenger::default());
        let store = Arc::new(InMemoryConversationStore::new());
        let config = EnvAssistantConfig {
            openai_api_key: "sk-test-key-123456".to_string(),
            openai_base_url: "http://localhost".to_string(),
            assistant_id: ASSISTANT_ID.to_string(),
            poll_interval_ms: 500,
            reply_timeout_secs: 30,
            fallback_message: "fallback".to_string(),
        };
        let components = assemble(
            &config,
            store.clone(),
            assistant.clone(),
            messenger.clone(),
            Arc::new(ManualClock::new()),
        );
        Self {
            assistant,
            messenger,
            store,
            components,
        }
    }

    pub fn state(&self) -> AppState {
        self.components.app_state(Some(VERIFY_TOKEN.to_string()))
    }
}

/// Text message delivery from `wa_id` with display name "Maria".
pub fn text_message(wa_id: &str, body: &str) -> Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "102290129340398",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": {
                        "display_phone_number": "15550783881",
                        "phone_number_id": "106540352242922"
                    },
                    "contacts": [{ "profile": { "name": "Maria" }, "wa_id": wa_id }],
                    "messages": [{
                        "from": wa_id,
                        "id": "wamid.HBgLMTU1MDc4Mzg4MQ==",
                        "timestamp": "1712595443",
                        "text": { "body": body },
                        "type": "text"
                    }]
                }
            }]
        }]
    })
}

pub fn image_message(wa_id: &str) -> Value {
    let mut body = text_message(wa_id, "");
    let message = &mut body["entry"][0]["changes"][0]["value"]["messages"][0];
    message["type"] = json!("image");
    message.as_object_mut().unwrap().remove("text");
    message["image"] = json!({ "id": "img-1", "mime_type": "image/jpeg" });
    body
}

pub fn status_update() -> Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "changes": [{
                "field": "messages",
                "value": {
                    "statuses": [{
                        "id": "wamid.X",
                        "status": "read",
                        "recipient_id": "5511999999999"
                    }]
                }
            }]
        }]
    })
}
