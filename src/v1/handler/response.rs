use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const CONFLICT: u16 = 409;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// What a single operation produced. Missing parts are filled in by
/// [`BookResponse::into_api_response`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookResponse {
    pub status_code: Option<u16>,
    pub body: Option<Value>,
}

impl BookResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code: Some(status_code),
            body: Some(body),
        }
    }
    /// A body that is a bare JSON string.
    pub fn message(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code, Value::String(message.into()))
    }
    /// A body of the form `{"message": ...}`.
    pub fn success(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code, json!({ "message": message.into() }))
    }
    pub fn into_api_response(self) -> ApiResponse {
        let body = self.body.unwrap_or_else(|| json!({}));
        ApiResponse {
            status_code: self.status_code.unwrap_or(OK),
            body: body.to_string(),
        }
    }
}

/// The gateway-facing response: a status and a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_json = json!(self).to_string();
        write!(f, "{as_json}")
    }
}
