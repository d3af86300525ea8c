//! Presence checks for request bodies.
//!
//! The only validation this service performs: a required field must exist, be
//! non-null, and (for strings) be non-empty after trimming. No type coercion,
//! no range checks, no cross-field rules.

use serde_json::Value;

/// Returns one human-readable message per missing required field; an empty
/// vec means the body passed.
pub fn required_fields(body: &Value, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| is_missing(body.get(**field)))
        .map(|field| format!("No {} specified.", field))
        .collect()
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
