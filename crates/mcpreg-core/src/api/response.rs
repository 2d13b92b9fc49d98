//! JSON responses produced by the router.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{CursorError, NotFoundError};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(500, format!("Failed to serialize response: {e}")),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(404, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::error(405, "Method not allowed")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Message of an error response
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<CursorError> for ApiResponse {
    fn from(err: CursorError) -> Self {
        ApiResponse::bad_request(err.to_string())
    }
}

impl From<NotFoundError> for ApiResponse {
    fn from(err: NotFoundError) -> Self {
        ApiResponse::not_found(err.to_string())
    }
}
