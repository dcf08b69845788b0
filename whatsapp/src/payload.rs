//! Webhook payload inspection.
//!
//! Deliveries from the Cloud API share one envelope:
//! `{"object": "...", "entry": [{"changes": [{"value": {"contacts": [...], "messages": [...]}}]}]}`.
//! Only the first entry, change, contact and message are considered.

use relay_core::{Contact, ContactId, InboundMessage};
use serde_json::Value;

fn first_value(body: &Value) -> Option<&Value> {
    body.get("entry")?
        .get(0)?
        .get("changes")?
        .get(0)?
        .get("value")
}

/// Non-null, non-false, non-zero and non-empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// True when `object` is present and truthy and `entry[0].changes[0].value.messages[0]`
/// is present and non-empty.
pub fn is_valid_whatsapp_message(body: &Value) -> bool {
    let has_object = body.get("object").is_some_and(is_truthy);
    let first_message = first_value(body)
        .and_then(|v| v.get("messages"))
        .and_then(|m| m.get(0));
    has_object && first_message.is_some_and(is_truthy)
}

/// True for delivery/read receipts (`entry[0].changes[0].value.statuses` present).
pub fn is_status_update(body: &Value) -> bool {
    first_value(body)
        .and_then(|v| v.get("statuses"))
        .is_some()
}

/// Sender and text of the first message, or `None` when the payload is not a text message
/// (invalid envelope, missing contact, non-text message type).
pub fn extract_text_message(body: &Value) -> Option<InboundMessage> {
    if !is_valid_whatsapp_message(body) {
        return None;
    }
    let value = first_value(body)?;
    let contact = value.get("contacts")?.get(0)?;
    let wa_id = contact.get("wa_id")?.as_str()?;
    let name = contact
        .pointer("/profile/name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let message = value.get("messages")?.get(0)?;
    let text = message.pointer("/text/body")?.as_str()?;
    let message_id = message.get("id").and_then(Value::as_str).map(String::from);

    Some(InboundMessage {
        contact: Contact {
            id: ContactId::new(wa_id),
            name: name.to_string(),
        },
        message_id,
        text: text.to_string(),
    })
}
