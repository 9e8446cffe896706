//! Error taxonomy for backend calls. Transport and timeout failures carry a
//! generic retry message; 4xx responses are classified into field-level
//! validation maps or the distinguished "approval code required" rejection so
//! flows can branch on the kind instead of probing ad hoc payload fields.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    Config(String),
    Network(String),
    Timeout(String),
    Http {
        status: u16,
        message: String,
    },
    /// 4xx with a field-level error map, surfaced next to the relevant inputs.
    Validation {
        status: u16,
        fields: BTreeMap<String, String>,
    },
    /// Sign-in rejection that routes into the code-verification sub-flow.
    AuthRequired {
        reason: String,
        email: Option<String>,
    },
    Parse(String),
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(message) => write!(formatter, "Config error: {message}"),
            ApiError::Network(message) => write!(formatter, "Network error: {message}"),
            ApiError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            ApiError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            ApiError::Validation { fields, .. } => {
                let mut first = true;
                for (field, message) in fields {
                    if !first {
                        write!(formatter, "; ")?;
                    }
                    write!(formatter, "{field}: {message}")?;
                    first = false;
                }
                Ok(())
            }
            ApiError::AuthRequired { .. } => {
                write!(formatter, "Additional verification is required.")
            }
            ApiError::Parse(message) => write!(formatter, "Response error: {message}"),
            ApiError::Serialization(message) => write!(formatter, "Request error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Message carried by the server payload, when one exists.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Classifies a non-2xx response body into an `ApiError`.
///
/// The backend signals the code-verification sub-flow with
/// `{"status": "approval_code_required", "email": ...}`, plain failures with
/// `{"error": ...}`, and form rejections with a `{field: [messages]}` map.
pub fn classify_response(status: u16, body: &str) -> ApiError {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return ApiError::Http {
            status,
            message: sanitize_body(body),
        };
    };
    let Some(object) = value.as_object() else {
        return ApiError::Http {
            status,
            message: sanitize_body(body),
        };
    };

    if let Some(reason) = object.get("status").and_then(Value::as_str) {
        if reason == "approval_code_required" {
            return ApiError::AuthRequired {
                reason: reason.to_string(),
                email: object
                    .get("email")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            };
        }
    }

    for key in ["error", "detail", "message"] {
        if let Some(message) = object.get(key).and_then(Value::as_str) {
            return ApiError::Http {
                status,
                message: sanitize_body(message),
            };
        }
    }

    let mut fields = BTreeMap::new();
    for (field, messages) in object {
        match messages {
            Value::String(message) => {
                fields.insert(field.clone(), message.clone());
            }
            Value::Array(list) => {
                if let Some(message) = list.first().and_then(Value::as_str) {
                    fields.insert(field.clone(), message.to_string());
                }
            }
            _ => {}
        }
    }
    if !fields.is_empty() && (400..500).contains(&status) {
        return ApiError::Validation { status, fields };
    }

    ApiError::Http {
        status,
        message: sanitize_body(body),
    }
}

/// Trims and truncates error bodies for user-facing messages.
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_approval_code_required() {
        let body = r#"{"error":"Votre compte nécessite un code d'activation.","status":"approval_code_required","email":"b@x.com"}"#;
        match classify_response(403, body) {
            ApiError::AuthRequired { reason, email } => {
                assert_eq!(reason, "approval_code_required");
                assert_eq!(email.as_deref(), Some("b@x.com"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn classify_plain_error_payload() {
        match classify_response(400, r#"{"error":"Code invalide"}"#) {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Code invalide");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn classify_field_map() {
        let body = r#"{"email":["Cet email est déjà utilisé"],"password":["Trop court"]}"#;
        match classify_response(400, body) {
            ApiError::Validation { status, fields } => {
                assert_eq!(status, 400);
                assert_eq!(
                    fields.get("email").map(String::as_str),
                    Some("Cet email est déjà utilisé")
                );
                assert_eq!(fields.get("password").map(String::as_str), Some("Trop court"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn classify_non_json_body_falls_back_to_http() {
        match classify_response(502, "<html>bad gateway</html>") {
            ApiError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "<html>bad gateway</html>");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn sanitize_body_handles_empty_and_long_input() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).chars().count(), MAX_ERROR_CHARS);
    }
}
