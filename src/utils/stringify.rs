use crate::error::BoxError;
use serde_json::Value;
use std::error::Error;
use std::fmt;

const NO_MESSAGE: &str = "N/A";
const UNSERIALIZABLE: &str = "Failed to stringify the error object.";

/// An exit cause nothing more specific is known about.
#[derive(Debug)]
pub enum UnknownCause {
    Error(BoxError),
    Message(String),
    Value(Value),
}

impl fmt::Display for UnknownCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify_error(self))
    }
}

fn unknown_error(data: &str) -> String {
    format!("Unknown Error ({})", data)
}

/// Best-effort text for an unknown cause. Never fails and never returns an
/// empty string.
///
/// Errors and objects with a `message` use it; an empty message becomes
/// `Unknown Error (N/A)`. Non-empty strings are kept as is. Everything else
/// is rendered as `Unknown Error (<json>)`.
pub fn stringify_error(cause: &UnknownCause) -> String {
    let message = match cause {
        UnknownCause::Error(err) => err.to_string(),
        UnknownCause::Message(message) if message.is_empty() => unknown_error("\"\""),
        UnknownCause::Message(message) => message.clone(),
        UnknownCause::Value(value) => stringify_value(value),
    };

    if message.is_empty() {
        unknown_error(NO_MESSAGE)
    } else {
        message
    }
}

/// [`stringify_error`] for a borrowed error.
pub fn error_message(err: &(dyn Error + 'static)) -> String {
    let message = err.to_string();
    if message.is_empty() {
        unknown_error(NO_MESSAGE)
    } else {
        message
    }
}

fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => unknown_error("\"\""),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => serialized(value),
        },
        other => serialized(other),
    }
}

fn serialized(value: &Value) -> String {
    match serde_json::to_string(value) {
        Ok(json) => unknown_error(&json),
        Err(_) => unknown_error(UNSERIALIZABLE),
    }
}
