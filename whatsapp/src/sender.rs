//! Graph API implementation of [`relay_core::Messenger`]. Sends one text message per call, no retry.

use async_trait::async_trait;
use relay_core::{ContactId, Messenger, Result};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::config::WhatsAppConfig;
use crate::error::WhatsAppError;

pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for a plain text message to `recipient` (`+<wa_id>`), link previews off.
pub fn text_message_body(recipient: &str, text: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "to": recipient,
        "type": "text",
        "text": { "preview_url": false, "body": text },
    })
}

/// Sends replies through `POST {graph}/{version}/{phone_number_id}/messages`.
#[derive(Clone)]
pub struct WhatsAppSender {
    http: reqwest::Client,
    messages_url: String,
    access_token: String,
}

impl WhatsAppSender {
    pub fn new(config: &WhatsAppConfig) -> std::result::Result<Self, WhatsAppError> {
        let http = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            http,
            messages_url: config.messages_url(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    async fn post(&self, body: &Value) -> std::result::Result<(), WhatsAppError> {
        let response = self
            .http
            .post(&self.messages_url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(WhatsAppError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        info!(
            status = status.as_u16(),
            content_type = %content_type,
            body = %text,
            "WhatsApp message sent"
        );
        Ok(())
    }
}

#[async_trait]
impl Messenger for WhatsAppSender {
    #[instrument(skip(self, text), fields(wa_id = %to))]
    async fn send_text(&self, to: &ContactId, text: &str) -> Result<()> {
        let body = text_message_body(&to.to_recipient(), text);
        info!(body = %body, "Sending message to WhatsApp");

        self.post(&body).await.map_err(|e| {
            match &e {
                WhatsAppError::Api { status, body } => {
                    error!(status = *status, response = %body, "Request failed")
                }
                WhatsAppError::Http(err) => error!(error = %err, "Request failed, no response"),
            }
            e.into()
        })
    }
}
