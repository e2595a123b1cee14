//! Flat payload to [`EventRecord`] reshaping.
//!
//! Tracking snippets post a single-level JSON object. Nine fixed keys carry
//! the event's scalar fields and are mandatory. Any number of
//! attribute and trait triples ride alongside them, grouped by a shared key
//! suffix:
//!
//! ```text
//! atrk<suffix>   name of the attribute     uatrk<suffix>   name of the trait
//! atrv<suffix>   its value                 uatrv<suffix>   its value
//! atrt<suffix>   its declared type         uatrt<suffix>   its declared type
//! ```
//!
//! A triple missing a member, or carrying a non-string member, is dropped.
//! A missing or non-string fixed field fails the whole reshape.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    error::{ReshapeError, Result},
    models::{Attribute, EventRecord, FlatPayload, Trait},
};

/// Payload keys of the fixed scalar fields, in the order they are checked.
pub const FIXED_FIELDS: [&str; 9] = ["ev", "et", "id", "uid", "mid", "t", "p", "l", "sc"];

/// Key prefixes making up one family of triples.
struct TripleKeys {
    name: &'static str,
    value: &'static str,
    kind: &'static str,
}

const ATTRIBUTE_KEYS: TripleKeys = TripleKeys { name: "atrk", value: "atrv", kind: "atrt" };

const TRAIT_KEYS: TripleKeys = TripleKeys { name: "uatrk", value: "uatrv", kind: "uatrt" };

/// Builds an [`EventRecord`] from a decoded flat payload.
///
/// # Errors
///
/// Returns [`ReshapeError::MissingField`] for the first fixed field (in
/// [`FIXED_FIELDS`] order) that is absent or not a string.
///
/// # Example
///
/// ```
/// use formhook_core::reshape;
/// use serde_json::json;
///
/// let payload = json!({
///     "ev": "click", "et": "ui", "id": "app1", "uid": "u1", "mid": "m1",
///     "t": "Home", "p": "/", "l": "en", "sc": "1920x1080",
///     "atrk1": "color", "atrv1": "red", "atrt1": "string",
/// });
///
/// let record = reshape(payload.as_object().unwrap()).unwrap();
/// assert_eq!(record.attributes["color"].value, "red");
/// assert!(record.traits.is_empty());
/// ```
pub fn reshape(payload: &FlatPayload) -> Result<EventRecord> {
    let [ev, et, id, uid, mid, t, p, l, sc] = FIXED_FIELDS;

    Ok(EventRecord {
        event: required_str(payload, ev)?,
        event_type: required_str(payload, et)?,
        app_id: required_str(payload, id)?,
        user_id: required_str(payload, uid)?,
        message_id: required_str(payload, mid)?,
        page_title: required_str(payload, t)?,
        page_url: required_str(payload, p)?,
        browser_language: required_str(payload, l)?,
        screen_size: required_str(payload, sc)?,
        attributes: extract_triples(payload, &ATTRIBUTE_KEYS, |value, kind| Attribute {
            value,
            kind,
        }),
        traits: extract_triples(payload, &TRAIT_KEYS, |value, kind| Trait { value, kind }),
    })
}

fn required_str(payload: &FlatPayload, field: &'static str) -> Result<String> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(ReshapeError::MissingField { field, found: describe(other) }),
    }
}

fn describe(value: Option<&Value>) -> &'static str {
    value.map_or("nothing", json_kind)
}

/// Names the JSON type of a value, as used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects every complete triple of one family, keyed by its name value.
///
/// The suffix is captured from the name key and the companion keys are
/// rebuilt from it, so a prefix appearing later in a key is never rewritten.
fn extract_triples<T>(
    payload: &FlatPayload,
    keys: &TripleKeys,
    build: impl Fn(String, String) -> T,
) -> BTreeMap<String, T> {
    let mut entries = BTreeMap::new();

    for (key, name) in payload {
        let Some(suffix) = key.strip_prefix(keys.name) else {
            continue;
        };
        let Some(name) = name.as_str() else {
            continue;
        };
        let Some(value) = companion(payload, keys.value, suffix) else {
            continue;
        };
        let Some(kind) = companion(payload, keys.kind, suffix) else {
            continue;
        };

        entries.insert(name.to_string(), build(value.to_string(), kind.to_string()));
    }

    entries
}

fn companion<'a>(payload: &'a FlatPayload, prefix: &str, suffix: &str) -> Option<&'a str> {
    payload.get(&format!("{prefix}{suffix}")).and_then(Value::as_str)
}
