//! Opaque pagination cursors

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};

use crate::error::FormatError;

/// Encode a `LastEvaluatedKey` as a base64 cursor (JSON, then base64).
pub fn encode_pagination_token(last_key: &Map<String, Value>) -> String {
    let json = Value::Object(last_key.clone()).to_string();
    STANDARD.encode(json.as_bytes())
}

/// Decode a cursor produced by [`encode_pagination_token`] back into an
/// `ExclusiveStartKey`.
pub fn decode_pagination_token(token: &str) -> Result<Map<String, Value>, FormatError> {
    let bytes = STANDARD.decode(token.trim()).map_err(FormatError::new)?;

    let value: Value = serde_json::from_slice(&bytes).map_err(FormatError::new)?;
    match value {
        Value::Object(key) => Ok(key),
        other => Err(FormatError::new(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
