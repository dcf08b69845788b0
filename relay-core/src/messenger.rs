//! Outbound messaging abstraction.
//!
//! [`Messenger`] is transport-agnostic; the WhatsApp Cloud API implementation lives in the `whatsapp` crate.

use crate::error::Result;
use crate::types::ContactId;
use async_trait::async_trait;

/// Sends reply text to a contact. Implementations map to a transport (e.g. WhatsApp Graph API).
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a plain text message to the given contact. Errors are transport failures; callers log them, no retry.
    async fn send_text(&self, to: &ContactId, text: &str) -> Result<()>;
}
