//! # relay-core
//!
//! Core types and traits for the WhatsApp relay: [`ContactId`], [`ConversationHandle`],
//! [`InboundMessage`], the outbound [`Messenger`] seam, the shared [`RelayError`], and
//! tracing initialization. Transport-agnostic; used by assistant-relay, whatsapp and whatsapp-bot.

pub mod error;
pub mod logger;
pub mod messenger;
pub mod types;

pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use messenger::Messenger;
pub use types::{Contact, ContactId, ConversationHandle, InboundMessage};
