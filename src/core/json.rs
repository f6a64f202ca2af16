use crate::domain::model::Registry;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

pub type JsonDocument = serde_json::Map<String, serde_json::Value>;

/// Serializes with a four-space indent, the layout of the enriched registry file.
pub fn to_registry_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Parses the registry file into its top-level object, keeping key order.
pub fn parse_document(data: &[u8]) -> Result<JsonDocument> {
    match serde_json::from_slice::<serde_json::Value>(data)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(EtlError::ValidationError {
            message: format!(
                "registry must be a JSON object keyed by gene symbol, found {}",
                json_kind(&other)
            ),
        }),
    }
}

pub fn parse_registry(data: &[u8]) -> Result<Registry> {
    Ok(Registry::from_json(&parse_document(data)?))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_space_indent() {
        let doc: JsonDocument = serde_json::from_str(r#"{"A": {"rank": 1}}"#).unwrap();
        let text = String::from_utf8(to_registry_json(&doc).unwrap()).unwrap();
        assert_eq!(text, "{\n    \"A\": {\n        \"rank\": 1\n    }\n}");
    }

    #[test]
    fn test_document_keeps_key_order() {
        let doc = parse_document(br#"{"ZAP70": 2, "ADA": 1, "BTK": 3}"#).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ZAP70", "ADA", "BTK"]);
    }

    #[test]
    fn test_non_object_registry_is_rejected() {
        let err = parse_document(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
        assert!(parse_document(b"{not json").is_err());
    }
}
