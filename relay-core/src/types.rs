//! Core types: contact identity, upstream conversation handle, and the inbound text message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// WhatsApp contact identifier (`wa_id`, phone-number derived). Used as the conversation store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recipient in the `+<wa_id>` form expected by the Graph API `to` field.
    pub fn to_recipient(&self) -> String {
        format!("+{}", self.0)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque id of a conversation (thread) held by the upstream assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHandle(String);

impl ConversationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConversationHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Messaging identity: contact id plus the profile display name (used for logging only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
}

/// A single inbound text message extracted from a webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub contact: Contact,
    /// Platform message id (`messages[0].id`), when present.
    pub message_id: Option<String>,
    pub text: String,
}
