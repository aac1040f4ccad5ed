//! Decoding of Clarity values in their typed JSON form
//!
//! Contract read-only calls can hand back values shaped like
//! `{"type": "uint", "value": "42"}`. These helpers flatten them into plain
//! JSON so callers can treat them like any other payload.

use serde_json::{Map, Number, Value};

use crate::shared::errors::ApiError;

/// Consensus type prefix of a `string-ascii` value
const STRING_ASCII_PREFIX: u8 = 0x0d;

/// Decode a typed Clarity value. JSON that does not carry a `type` tag is
/// returned unchanged.
pub fn decode_clarity_value(value: Value) -> Value {
    let mut obj = match value {
        Value::Object(obj) => obj,
        other => return other,
    };

    let kind = match obj.get("type").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => return Value::Object(obj),
    };
    let inner = obj.remove("value").unwrap_or(Value::Null);

    match kind.as_str() {
        "uint" | "int" => decode_integer(inner),
        "bool" => match inner {
            Value::String(s) => Value::Bool(s.eq_ignore_ascii_case("true")),
            other => other,
        },
        "optional" | "some" | "response" | "ok" | "err" => match inner {
            Value::Null => Value::Null,
            other => decode_clarity_value(other),
        },
        "none" => Value::Null,
        "tuple" => match inner {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, decode_clarity_value(v)))
                    .collect::<Map<String, Value>>(),
            ),
            other => other,
        },
        "list" => match inner {
            Value::Array(items) => Value::Array(items.into_iter().map(decode_clarity_value).collect()),
            other => other,
        },
        // string-ascii, string-utf8, principal, buff and anything newer
        _ => inner,
    }
}

fn decode_integer(inner: Value) -> Value {
    let text = match &inner {
        Value::String(s) => s.trim().trim_start_matches('u').to_string(),
        _ => return inner,
    };
    if let Ok(n) = text.parse::<u64>() {
        return Value::Number(Number::from(n));
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(Number::from(n));
    }
    // u128 range: keep the digits rather than lose precision
    Value::String(text)
}

/// Normalize a `get-all-templates` result into a list of templates.
///
/// A list becomes its items, an absent value becomes empty, anything else is
/// a single template.
pub fn into_template_list(result: Value) -> Vec<Value> {
    match decode_clarity_value(result) {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Template id usable as a lookup key. Hex-serialized values that were not
/// decoded to JSON are not ids.
pub fn listed_template_id(template: &Value) -> Option<&str> {
    template
        .as_str()
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.starts_with("0x"))
}

/// Hex-serialize a `string-ascii` argument for a read-only call:
/// `0x0d`, the length as 4 big-endian bytes, then the characters.
pub fn encode_string_ascii(value: &str) -> Result<String, ApiError> {
    if !value.is_ascii() {
        return Err(ApiError::InvalidArgument(format!("{:?} is not ASCII", value)));
    }
    let len = u32::try_from(value.len())
        .map_err(|_| ApiError::InvalidArgument(format!("string of {} bytes is too long", value.len())))?;

    let mut bytes = Vec::with_capacity(5 + value.len());
    bytes.push(STRING_ASCII_PREFIX);
    bytes.extend_from_slice(&len.to_be_bytes());
    bytes.extend_from_slice(value.as_bytes());
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Tag a decoded template record with its id.
pub fn with_template_id(template_id: &str, detail: Value) -> Value {
    match detail {
        Value::Object(mut fields) => {
            fields.insert("template_id".to_string(), Value::String(template_id.to_string()));
            Value::Object(fields)
        }
        other => serde_json::json!({"template_id": template_id, "value": other}),
    }
}
