//! Error types shared by the network layer and the reducers.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failure talking to the fine-tuning service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("failed to build request: {0}")]
    Request(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response has no body")]
    MissingBody,

    #[error("stream read failed: {0}")]
    Stream(String),
}

impl ApiError {
    /// HTTP status code if the service answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn request(value: JsValue) -> Self {
        ApiError::Request(js_error_message(&value))
    }

    pub(crate) fn network(value: JsValue) -> Self {
        ApiError::Network(js_error_message(&value))
    }

    pub(crate) fn stream(value: JsValue) -> Self {
        ApiError::Stream(js_error_message(&value))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Reasons a playground message is rejected before any request is sent.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("message is empty")]
    EmptyInput,

    #[error("a reply is still streaming")]
    StreamInFlight,

    #[error("no deployed model selected")]
    NoModelSelected,
}

/// Best-effort text for a thrown JS value (`Error.message`, a plain string,
/// or the debug representation).
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// Map an HTTP error status to the message shown to the user.
pub fn describe_http_status(status: u16, status_text: &str, body: &str) -> String {
    match status {
        400 => format!("Bad request: {}", status_text),
        404 => "The requested resource was not found.".to_string(),
        409 => "Conflict: the task is busy with another operation.".to_string(),
        422 => {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
                    return format!("Validation failed: {}", detail);
                }
            }
            "Validation failed".to_string()
        }
        500..=599 => format!("Server error: {} {}", status, status_text),
        _ => format!("API request failed: {} {}", status, status_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_detail_is_surfaced() {
        let body = r#"{"detail":"base_model is required"}"#;
        assert_eq!(
            describe_http_status(422, "Unprocessable Entity", body),
            "Validation failed: base_model is required"
        );
        assert_eq!(describe_http_status(422, "Unprocessable Entity", "oops"), "Validation failed");
    }

    #[test]
    fn server_errors_keep_status() {
        assert_eq!(
            describe_http_status(503, "Service Unavailable", ""),
            "Server error: 503 Service Unavailable"
        );
        assert_eq!(describe_http_status(418, "I'm a teapot", ""), "API request failed: 418 I'm a teapot");
    }

    #[test]
    fn http_error_exposes_status() {
        let err = ApiError::Http { status: 404, message: "gone".into() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "gone");
        assert_eq!(ApiError::MissingBody.status(), None);
    }

    #[test]
    fn decode_errors_convert() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
