//! JSON codec over `serde_json`

use paybridge_domain::{Document, DocumentValue, PayBridgeError, Result};

/// Serialize a document as a JSON object.
///
/// # Errors
/// Returns [`PayBridgeError::Encoding`] if serialization fails.
pub fn encode(doc: &Document) -> Result<Vec<u8>> {
    let value = serde_json::Value::from(doc);
    serde_json::to_vec(&value).map_err(|e| PayBridgeError::Encoding(format!("JSON encode failed: {e}")))
}

/// Parse a JSON object into a document; integral numbers become integers.
///
/// # Errors
/// Returns [`PayBridgeError::Encoding`] for invalid JSON or a top-level value
/// that is not an object.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| PayBridgeError::Encoding(format!("invalid JSON: {e}")))?;

    match DocumentValue::from(value) {
        DocumentValue::Document(doc) => Ok(doc),
        other => Err(PayBridgeError::Encoding(format!(
            "expected a JSON object at the top level, found {}",
            kind(&other)
        ))),
    }
}

const fn kind(value: &DocumentValue) -> &'static str {
    match value {
        DocumentValue::Null => "null",
        DocumentValue::Bool(_) => "boolean",
        DocumentValue::Integer(_) | DocumentValue::Float(_) => "number",
        DocumentValue::String(_) => "string",
        DocumentValue::Document(_) => "object",
        DocumentValue::Array(_) => "array",
    }
}
