//! Structured event record produced from a flat tracking payload.
//!
//! The JSON field names are part of the downstream webhook contract and
//! must not change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat, single-level payload as decoded from the request body.
pub type FlatPayload = serde_json::Map<String, serde_json::Value>;

/// Event-scoped property extracted from an `atrk`/`atrv`/`atrt` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Property value
    pub value: String,
    /// Declared type of the value, as sent by the client
    #[serde(rename = "type")]
    pub kind: String,
}

/// User-scoped property extracted from a `uatrk`/`uatrv`/`uatrt` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    /// Property value
    pub value: String,
    /// Declared type of the value, as sent by the client
    #[serde(rename = "type")]
    pub kind: String,
}

/// Structured tracking event forwarded to the webhook.
///
/// # Example
///
/// ```
/// use formhook_core::{Attribute, EventRecord};
///
/// let mut record = EventRecord::default();
/// record.event = "click".to_string();
/// record
///     .attributes
///     .insert("color".to_string(), Attribute { value: "red".into(), kind: "string".into() });
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["attributes"]["color"]["type"], "string");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name (`ev`)
    pub event: String,
    /// Event type (`et`)
    pub event_type: String,
    /// Application identifier (`id`)
    pub app_id: String,
    /// User identifier (`uid`)
    pub user_id: String,
    /// Message identifier (`mid`)
    pub message_id: String,
    /// Page title (`t`)
    pub page_title: String,
    /// Page URL (`p`)
    pub page_url: String,
    /// Browser language (`l`)
    pub browser_language: String,
    /// Screen size (`sc`)
    pub screen_size: String,
    /// Event attributes keyed by their kind value
    pub attributes: BTreeMap<String, Attribute>,
    /// User traits keyed by their kind value
    pub traits: BTreeMap<String, Trait>,
}
