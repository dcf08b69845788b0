//! Webhook message handler: inbound text → assistant reply → WhatsApp send.

use assistant_relay::MessageOrchestrator;
use relay_core::{InboundMessage, Messenger, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use whatsapp::{extract_text_message, process_text_for_whatsapp};

/// What happened to one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processed {
    /// A reply was generated and sent.
    Replied,
    /// Valid delivery without a text body (image, audio, ...); nothing sent.
    Ignored,
}

/// Runs one turn per inbound text message. Built once, shared by all requests.
pub struct WebhookHandler {
    orchestrator: MessageOrchestrator,
    messenger: Arc<dyn Messenger>,
}

impl WebhookHandler {
    pub fn new(orchestrator: MessageOrchestrator, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            orchestrator,
            messenger,
        }
    }

    /// Handles a payload already accepted by `is_valid_whatsapp_message`.
    pub async fn process(&self, body: &Value) -> Result<Processed> {
        match extract_text_message(body) {
            Some(message) => {
                self.reply(&message).await?;
                Ok(Processed::Replied)
            }
            None => {
                info!("Valid delivery without a text message, ignoring");
                Ok(Processed::Ignored)
            }
        }
    }

    /// Asks the assistant, formats the answer for WhatsApp and sends it to the contact.
    #[instrument(skip(self, message), fields(wa_id = %message.contact.id))]
    pub async fn reply(&self, message: &InboundMessage) -> Result<()> {
        let contact = &message.contact;
        info!(
            name = %contact.name,
            message_id = ?message.message_id,
            "Received message"
        );

        let reply = self
            .orchestrator
            .handle_inbound(&contact.id, &contact.name, &message.text)
            .await?;
        let text = process_text_for_whatsapp(&reply);

        self.messenger.send_text(&contact.id, &text).await
    }
}
