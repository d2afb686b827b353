//! Raw records as delivered by a record store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use dash_model::ID_COLUMN;

use crate::error::{IngestError, Result};

/// Key holding the field mapping in the nested `{id, fields}` shape.
const FIELDS_KEY: &str = "fields";

/// Key wrapping the record list in a store export.
const RECORDS_KEY: &str = "records";

/// One untyped record: a store-assigned identifier and its fields in the
/// order the store returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, JsonValue>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Parse untyped JSON into raw records.
///
/// Accepts an array of records, or an object whose `records` key holds one.
/// Each record is either nested (`{"id": .., "fields": {..}}`, extra keys
/// ignored) or flat (`{"id": .., "Product Name": ..}`).
///
/// # Errors
///
/// Returns a malformed-input error for any other shape, or when a record
/// lacks a string `id`.
pub fn parse_records(raw: &JsonValue) -> Result<Vec<RawRecord>> {
    let items = match raw {
        JsonValue::Array(items) => items,
        JsonValue::Object(object) => match object.get(RECORDS_KEY) {
            Some(JsonValue::Array(items)) => items,
            _ => {
                return Err(IngestError::malformed(format!(
                    "expected an array of records or an object with a `{RECORDS_KEY}` array"
                )));
            }
        },
        other => {
            return Err(IngestError::malformed(format!(
                "expected an array of records, found {}",
                json_kind(other)
            )));
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

fn parse_record(index: usize, item: &JsonValue) -> Result<RawRecord> {
    let JsonValue::Object(object) = item else {
        return Err(IngestError::malformed(format!(
            "record {index}: expected an object, found {}",
            json_kind(item)
        )));
    };
    let id = match object.get(ID_COLUMN) {
        Some(JsonValue::String(id)) => id.clone(),
        Some(other) => {
            return Err(IngestError::malformed(format!(
                "record {index}: `{ID_COLUMN}` must be a string, found {}",
                json_kind(other)
            )));
        }
        None => {
            return Err(IngestError::malformed(format!(
                "record {index}: missing `{ID_COLUMN}`"
            )));
        }
    };
    let fields = match object.get(FIELDS_KEY) {
        Some(JsonValue::Object(fields)) => fields.clone(),
        _ => object
            .iter()
            .filter(|(name, _)| name.as_str() != ID_COLUMN)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
    };
    Ok(RawRecord { id, fields })
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_records() {
        let raw = json!([
            {"id": "r1", "fields": {"Product Name": "A", "Total Price": 50}, "createdTime": "x"}
        ]);
        let records = parse_records(&raw).expect("parse records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "r1");
        let names: Vec<_> = records[0].fields.keys().cloned().collect();
        assert_eq!(names, vec!["Product Name", "Total Price"]);
    }

    #[test]
    fn parses_flat_records_in_field_order() {
        let raw = json!({"records": [{"id": "r1", "Units Sold": 3, "Product Name": "A"}]});
        let records = parse_records(&raw).expect("parse records");
        let names: Vec<_> = records[0].fields.keys().cloned().collect();
        assert_eq!(names, vec!["Units Sold", "Product Name"]);
    }

    #[test]
    fn rejects_non_sequences() {
        assert!(parse_records(&json!("records")).is_err());
        assert!(parse_records(&json!({"data": []})).is_err());
    }

    #[test]
    fn rejects_records_without_string_id() {
        let err = parse_records(&json!([{"fields": {}}])).unwrap_err();
        assert!(err.to_string().contains("missing `id`"));
        let err = parse_records(&json!([{"id": 7, "fields": {}}])).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
        assert!(parse_records(&json!([["r1", {}]])).is_err());
    }
}
