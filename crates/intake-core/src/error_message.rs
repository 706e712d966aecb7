//! Error-message extraction.
//!
//! The fallback every error-reporting path uses, so none of these can panic
//! whatever they are handed.

use std::any::Any;

use serde_json::Value;

/// Message of a typed error (its `Display` output).
pub fn error_message(error: &(dyn std::error::Error + '_)) -> String {
    error.to_string()
}

/// Message carried by an arbitrary JSON error value.
///
/// An object with a string `message` yields that string, a string yields
/// itself, and anything else yields its JSON text.
pub fn message_from_value(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => value.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Message of a caught panic payload.
pub fn message_from_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
