use std::collections::HashMap;

use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Number, Value};

use crate::v1::store::StoreError;

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_item(map)),
    }
}

pub fn to_item(map: &Map<String, Value>) -> HashMap<String, AttributeValue> {
    map.iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

pub fn from_attribute(attribute: &AttributeValue) -> Result<Value, StoreError> {
    Ok(match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(from_attribute)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_item(map)?),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(items) => Value::Array(
            items
                .iter()
                .map(|b| Value::String(encode_blob(b)))
                .collect(),
        ),
        other => {
            return Err(StoreError::Serialization(format!(
                "unsupported attribute value: {:?}",
                other
            )))
        }
    })
}

pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Map<String, Value>, StoreError> {
    item.iter()
        .map(|(k, v)| from_attribute(v).map(|v| (k.clone(), v)))
        .collect()
}

fn parse_number(n: &str) -> Result<Number, StoreError> {
    n.parse::<Number>()
        .map_err(|e| StoreError::Serialization(format!("invalid number {}: {}", n, e)))
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_record_survives_conversion() {
        let record = json!({
            "ISBN": "123",
            "price": 12.5,
            "pages": 300,
            "tags": ["sf", "classic"],
            "publisher": {"name": "Ace", "reprint": true},
            "subtitle": null
        });
        let item = to_item(record.as_object().unwrap());
        assert_eq!(item["pages"], AttributeValue::N("300".into()));
        assert_eq!(item["subtitle"], AttributeValue::Null(true));
        assert_eq!(Value::Object(from_item(&item).unwrap()), record);
    }

    #[test]
    fn sets_and_blobs_read_back_as_arrays() {
        let attr = AttributeValue::Ss(vec!["a".into(), "b".into()]);
        assert_eq!(from_attribute(&attr).unwrap(), json!(["a", "b"]));
        let attr = AttributeValue::Ns(vec!["1".into(), "2.5".into()]);
        assert_eq!(from_attribute(&attr).unwrap(), json!([1, 2.5]));
        let attr = AttributeValue::B(Blob::new(b"hi".to_vec()));
        assert_eq!(from_attribute(&attr).unwrap(), json!("aGk="));
    }

    #[test]
    fn malformed_number_is_an_error() {
        assert!(from_attribute(&AttributeValue::N("x1".into())).is_err());
    }
}
