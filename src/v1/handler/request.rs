use std::{collections::HashMap, str::FromStr};

use serde::Deserialize;
use serde_json::{Map, Value};
use strum_macros::EnumString;

use super::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Echo,
    Create,
    Read,
    Update,
    Delete,
}

/// The slice of an API Gateway event the handler reads.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub dictionary: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(operation: &str, dictionary: Value) -> Self {
        Self {
            path_parameters: Some(HashMap::from([(
                "operation".to_string(),
                operation.to_string(),
            )])),
            dictionary: Some(dictionary),
            ..Default::default()
        }
    }
    pub fn base64_encoded(mut self) -> Self {
        self.is_base64_encoded = Some(true);
        self
    }
    /// The `operation` path parameter, lower-cased. Empty when absent.
    pub fn raw_operation(&self) -> String {
        self.path_parameters
            .as_ref()
            .and_then(|p| p.get("operation"))
            .map(|op| op.to_lowercase())
            .unwrap_or_default()
    }
    pub fn operation(&self) -> Result<Operation, RequestError> {
        let raw = self.raw_operation();
        Operation::from_str(&raw).map_err(|_| RequestError::UnsupportedOperation(raw))
    }
    pub fn is_image_encoded(&self) -> bool {
        self.is_base64_encoded.unwrap_or(false)
    }
    /// The book payload as a mapping, parsing it first if it arrived as a string.
    pub fn payload(&self) -> Result<Map<String, Value>, RequestError> {
        match &self.dictionary {
            None | Some(Value::Null) => Err(RequestError::MissingData),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Ok(map),
                _ => Err(RequestError::InvalidJson),
            },
            Some(_) => Err(RequestError::InvalidJson),
        }
    }
    /// `dictionary.message` for echo, or an empty string when there is none.
    pub fn echo_message(&self) -> Result<Value, RequestError> {
        let payload = match &self.dictionary {
            None | Some(Value::Null) => return Ok(Value::String(String::new())),
            _ => self.payload()?,
        };
        Ok(payload
            .get("message")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn operation_is_case_insensitive() {
        assert_eq!(
            ApiRequest::new("CrEaTe", json!({})).operation(),
            Ok(Operation::Create)
        );
        assert_eq!(Operation::Delete.to_string(), "delete");
    }

    #[test]
    fn unknown_and_missing_operations_are_unsupported() {
        assert_eq!(
            ApiRequest::new("LIST", json!({})).operation(),
            Err(RequestError::UnsupportedOperation("list".into()))
        );
        assert_eq!(
            ApiRequest::default().operation(),
            Err(RequestError::UnsupportedOperation(String::new()))
        );
    }

    #[test]
    fn string_payload_is_parsed_once() {
        let request = ApiRequest::new("read", json!(r#"{"ISBN": "1"}"#));
        assert_eq!(request.payload().unwrap()["ISBN"], "1");
        let request = ApiRequest::new("read", json!("{ISBN: 1"));
        assert_eq!(request.payload(), Err(RequestError::InvalidJson));
        let request = ApiRequest::new("read", json!("[1, 2]"));
        assert_eq!(request.payload(), Err(RequestError::InvalidJson));
    }

    #[test]
    fn missing_payload() {
        let mut request = ApiRequest::new("read", Value::Null);
        assert_eq!(request.payload(), Err(RequestError::MissingData));
        request.dictionary = None;
        assert_eq!(request.payload(), Err(RequestError::MissingData));
    }

    #[test]
    fn deserializes_gateway_event() {
        let request: ApiRequest = serde_json::from_value(json!({
            "pathParameters": {"operation": "Update"},
            "dictionary": {"ISBN": "1"},
            "isBase64Encoded": true,
            "body": {"message": "ignored"},
            "headers": {"Accept": "*/*"}
        }))
        .unwrap();
        assert_eq!(request.operation(), Ok(Operation::Update));
        assert!(request.is_image_encoded());

        let request: ApiRequest =
            serde_json::from_value(json!({"pathParameters": null, "isBase64Encoded": null}))
                .unwrap();
        assert!(!request.is_image_encoded());
        assert_eq!(request.raw_operation(), "");
    }

    #[test]
    fn echo_message_comes_from_dictionary() {
        let mut request = ApiRequest::new("echo", json!({"message": "hi"}));
        request.body = Some(json!({"message": "other"}));
        assert_eq!(request.echo_message(), Ok(json!("hi")));
        assert_eq!(
            ApiRequest::new("echo", json!(r#"{"message": "str"}"#)).echo_message(),
            Ok(json!("str"))
        );
        assert_eq!(ApiRequest::default().echo_message(), Ok(json!("")));
    }
}
