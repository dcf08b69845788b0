//! # whatsapp
//!
//! WhatsApp Cloud API layer: webhook payload gate and extraction, assistant-text formatting,
//! the Graph API [`WhatsAppSender`] implementing [`relay_core::Messenger`], and env config.
//! Handles only WhatsApp connectivity; no persistence or assistant logic.

mod config;
mod error;
mod format;
mod payload;
mod sender;

pub use config::{WhatsAppConfig, DEFAULT_GRAPH_API_URL};
pub use error::WhatsAppError;
pub use format::process_text_for_whatsapp;
pub use payload::{extract_text_message, is_status_update, is_valid_whatsapp_message};
pub use sender::{text_message_body, WhatsAppSender, SEND_TIMEOUT};
