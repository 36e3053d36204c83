//! Request/response DTOs for session endpoints.
//!
//! Bodies use camelCase field names. Missing string fields deserialize as
//! empty so they surface as validation errors rather than parse failures.

use serde::{Deserialize, Serialize};

use crate::domain::session::SessionError;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub host_name: String,
}

/// POST /api/sessions/:code/join
#[derive(Debug, Clone, Deserialize)]
pub struct JoinSessionRequest {
    #[serde(default)]
    pub name: String,
}

/// POST /api/sessions/:code/vote
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub participant_id: String,
    #[serde(default)]
    pub value: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Acknowledgement for commands with no payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error body: a stable machine code plus a readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&SessionError> for ErrorResponse {
    fn from(error: &SessionError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionCode;

    #[test]
    fn create_session_request_deserializes_camel_case() {
        let json = r#"{"scale": "tshirt", "hostName": "Alice"}"#;
        let req: CreateSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.scale, "tshirt");
        assert_eq!(req.host_name, "Alice");
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let req: VoteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.participant_id.is_empty());
        assert!(req.value.is_empty());
    }

    #[test]
    fn success_response_serializes() {
        let json = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[test]
    fn error_response_from_session_error() {
        let error = SessionError::not_found(&SessionCode::normalize("abc234"));
        let body = ErrorResponse::from(&error);
        assert_eq!(body.code, "SESSION_NOT_FOUND");
        assert_eq!(body.message, "Session not found: ABC234");
    }
}
