use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loosely typed text that is either a single string or a sequence of lines.
///
/// Definition files are untyped, so the raw value is kept and normalized on
/// demand: a string becomes one line, string entries of a sequence are kept in
/// order and everything else is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextInput(Value);

impl TextInput {
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Normalized lines.
    pub fn lines(&self) -> Vec<String> {
        match &self.0 {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// String entries if the value is a sequence, `None` for anything else.
    pub fn sequence(&self) -> Option<Vec<String>> {
        match &self.0 {
            Value::Array(_) => Some(self.lines()),
            _ => None,
        }
    }
}

impl From<Value> for TextInput {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<Vec<String>> for TextInput {
    fn from(values: Vec<String>) -> Self {
        Self(Value::Array(values.into_iter().map(Value::String).collect()))
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(values: Vec<&str>) -> Self {
        values
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl<const N: usize> From<[&str; N]> for TextInput {
    fn from(values: [&str; N]) -> Self {
        Vec::from(values).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_string_becomes_one_line() {
        assert_eq!(TextInput::from("hello").lines(), vec!["hello"]);
    }

    #[test]
    fn sequence_keeps_only_strings() {
        let input = TextInput::from(json!(["a", 42, null, "b", {"c": 1}]));
        assert_eq!(input.lines(), vec!["a", "b"]);
    }

    #[test]
    fn other_values_are_empty() {
        assert!(TextInput::from(json!(12)).lines().is_empty());
        assert!(TextInput::from(json!({"a": "b"})).lines().is_empty());
        assert!(TextInput::default().lines().is_empty());
    }

    #[test]
    fn sequence_only_for_arrays() {
        assert_eq!(TextInput::from("name").sequence(), None);
        assert_eq!(
            TextInput::from(["name", "path"]).sequence(),
            Some(vec!["name".to_string(), "path".to_string()])
        );
    }

    #[test]
    fn deserializes_transparently() {
        let input: TextInput = serde_json::from_str(r#"["x", 1]"#).expect("parse");
        assert_eq!(input.lines(), vec!["x"]);
    }
}
