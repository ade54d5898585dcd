//! Error Types
//!
//! Every service call returns `Result<T, ApiError>`. Views hand failures to
//! `report_error`, which logs and shows a blocking alert.

use thiserror::Error;

/// Shown when nothing more specific can be extracted
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Login succeeded at the HTTP level but carried no token
    #[error("Login response did not contain a token")]
    MissingToken,

    /// Client-side form validation failure, never sent to the server
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Build an `Http` error from a status and the raw response body
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Http { status, message: extract_message(body) }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    /// Best-effort message for the person at the screen
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message: Some(msg), .. } => msg.clone(),
            ApiError::Http { status: 401, .. } => "Your session has expired. Please log in again.".to_string(),
            ApiError::Http { status: 403, .. } => "You do not have permission to do that.".to_string(),
            ApiError::Http { status: 404, .. } => "The requested record was not found.".to_string(),
            ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            ApiError::MissingToken => "Login failed. Please check your credentials.".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Http { .. } | ApiError::Decode(_) => GENERIC_ERROR.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http { status: status.as_u16(), message: None }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Pull `message`, `error` or `msg` out of a JSON error body
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Local error handler used by every view: log, then alert
pub fn report_error(context: &str, err: &ApiError) {
    log::error!("[{}] {}", context, err);
    let message = err.user_message();
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(&message).is_err() {
            log::warn!("[{}] could not show alert", context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_message_field() {
        let body = r#"{"error":"Bad","message":"Member is blocked"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Member is blocked"));
    }

    #[test]
    fn test_extract_message_falls_back_to_error_field() {
        assert_eq!(extract_message(r#"{"error":"Invalid PIN"}"#).as_deref(), Some("Invalid PIN"));
        assert_eq!(extract_message(r#"{"message":"  "}"#), None);
        assert_eq!(extract_message("<html>502</html>"), None);
    }

    #[test]
    fn test_user_message_uses_server_text_then_fallback() {
        let err = ApiError::from_status(400, r#"{"message":"Phone already registered"}"#);
        assert_eq!(err.user_message(), "Phone already registered");

        let err = ApiError::from_status(500, "");
        assert_eq!(err.user_message(), GENERIC_ERROR);

        let err = ApiError::from_status(401, "");
        assert!(err.is_unauthorized());
        assert!(err.user_message().contains("log in"));
    }
}
