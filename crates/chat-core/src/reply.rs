//! Interpreting chat backend response bodies.

use serde_json::Value;

/// Text and suggestion chips extracted from a backend body
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub chips: Vec<String>,
}

impl BotReply {
    /// `reply`, falling back to `message`, falling back to the whole body
    /// serialized as JSON. Empty or falsy fields fall through. Chips default
    /// to empty.
    pub fn from_body(body: &Value) -> Self {
        let text = ["reply", "message"]
            .iter()
            .find_map(|key| body.get(key).filter(|v| !is_falsy(v)))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| body.to_string());

        let chips = body
            .get("chips")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .map(|c| match c {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { text, chips }
    }
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
