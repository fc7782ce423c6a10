//! Payload model shared by smart actions and action creators

use serde_json::{Map, Value};

/// Key under which an action's type is stored in its payload
pub const TYPE_KEY: &str = "type";

/// The object an action produces when invoked
///
/// Payloads are plain JSON objects so they can be logged, compared and
/// handed to any reducer without an intermediate type.
pub type Payload = Map<String, Value>;

/// Set the `type` field of a payload to `name`
///
/// Any `type` already present is overwritten; the canonical name wins.
///
/// # Example
/// ```
/// use easy_actions_core::payload::{type_of, with_type, Payload};
/// use serde_json::json;
///
/// let mut payload = Payload::new();
/// payload.insert("type".into(), json!("WRONG"));
///
/// let payload = with_type(payload, "ADD_ITEM");
/// assert_eq!(type_of(&payload), Some("ADD_ITEM"));
/// ```
pub fn with_type(mut payload: Payload, name: &str) -> Payload {
    payload.insert(TYPE_KEY.to_string(), Value::String(name.to_string()));
    payload
}

/// Set the `type` field of a payload to `name` unless it already has one
///
/// A payload that already carries a `type`, such as one returned by a
/// sibling action, is left as it is.
pub fn with_default_type(mut payload: Payload, name: &str) -> Payload {
    payload
        .entry(TYPE_KEY)
        .or_insert_with(|| Value::String(name.to_string()));
    payload
}

/// Read the `type` field of a payload, if it holds a string
pub fn type_of(payload: &Payload) -> Option<&str> {
    payload.get(TYPE_KEY).and_then(Value::as_str)
}
