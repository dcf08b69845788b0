//! reqwest-based implementation of [`AssistantApi`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::AssistantError;
use crate::mask_token;
use crate::types::{
    ApiErrorBody, Assistant, CreateMessageRequest, CreateRunRequest, ListResponse, Run, Thread,
    ThreadMessage,
};
use crate::AssistantApi;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI Assistants client. Cheap to clone; shares the underlying connection pool.
#[derive(Clone)]
pub struct OpenAIAssistantClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAIAssistantClient {
    /// Builds a client using the given API key and the default API base URL.
    pub fn new(api_key: String) -> Result<Self, AssistantError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Builds a client with a custom base URL (proxies, compatible endpoints, mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        info!(
            base_url = %base_url,
            api_key = %mask_token(&api_key),
            "OpenAI assistant client created"
        );

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    /// Sends the request and decodes a 2xx JSON body. 404 becomes [`AssistantError::NotFound`].
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> Result<T, AssistantError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AssistantError::InvalidResponse(format!("{}: {}", resource, e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        if status == StatusCode::NOT_FOUND {
            debug!(resource = %resource, message = %message, "Assistant API resource not found");
            return Err(AssistantError::NotFound {
                resource: resource.to_string(),
                message,
            });
        }

        warn!(
            resource = %resource,
            status = status.as_u16(),
            message = %message,
            "Assistant API request failed"
        );
        Err(AssistantError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AssistantApi for OpenAIAssistantClient {
    #[instrument(skip(self))]
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant, AssistantError> {
        let builder = self.request(Method::GET, &format!("assistants/{}", assistant_id));
        self.send_json(builder, &format!("assistant {}", assistant_id))
            .await
    }

    #[instrument(skip(self))]
    async fn create_thread(&self) -> Result<Thread, AssistantError> {
        let builder = self
            .request(Method::POST, "threads")
            .json(&serde_json::json!({}));
        let thread: Thread = self.send_json(builder, "thread").await?;
        debug!(thread_id = %thread.id, "Thread created");
        Ok(thread)
    }

    #[instrument(skip(self))]
    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread, AssistantError> {
        let builder = self.request(Method::GET, &format!("threads/{}", thread_id));
        self.send_json(builder, &format!("thread {}", thread_id))
            .await
    }

    #[instrument(skip(self, content))]
    async fn create_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError> {
        let builder = self
            .request(Method::POST, &format!("threads/{}/messages", thread_id))
            .json(&CreateMessageRequest {
                role: "user",
                content,
            });
        self.send_json(builder, &format!("thread {}", thread_id))
            .await
    }

    #[instrument(skip(self))]
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, AssistantError> {
        let builder = self
            .request(Method::POST, &format!("threads/{}/runs", thread_id))
            .json(&CreateRunRequest { assistant_id });
        self.send_json(builder, &format!("thread {}", thread_id))
            .await
    }

    #[instrument(skip(self))]
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        let builder = self.request(
            Method::GET,
            &format!("threads/{}/runs/{}", thread_id, run_id),
        );
        self.send_json(builder, &format!("run {}", run_id)).await
    }

    #[instrument(skip(self))]
    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, AssistantError> {
        let builder = self
            .request(Method::GET, &format!("threads/{}/messages", thread_id))
            .query(&[("order", "desc"), ("limit", "1")]);
        let list: ListResponse<ThreadMessage> = self
            .send_json(builder, &format!("thread {}", thread_id))
            .await?;
        Ok(list.data.into_iter().next())
    }
}
