/// Error handling for the API server
///
/// All handlers return `Result<T, ApiError>`. `ApiError` renders the common
/// response envelope:
///
/// ```json
/// { "success": false, "error": "conflict", "message": "Email already registered" }
/// ```
///
/// # Status mapping for account errors
///
/// | `AuthError`          | Status | Message                        |
/// |----------------------|--------|--------------------------------|
/// | `Validation`         | 400    | Request validation failed      |
/// | `Conflict`           | 409    | Email already registered       |
/// | `InvalidCredentials` | 401    | Invalid email or password      |
/// | `Timeout`            | 500    | An internal error occurred     |
/// | `Internal`           | 500    | An internal error occurred     |
///
/// Internal causes are logged by the service that hit them and are never
/// written to the response.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use printshop_shared::auth::service::{AuthError, FieldError, INVALID_CREDENTIALS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every 500
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400), e.g. unreadable JSON body
    BadRequest(String),

    /// Validation failed (400) with per-field details
    ValidationError(Vec<ValidationErrorDetail>),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Method not allowed (405) on a known path
    MethodNotAllowed(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Internal server error (500); the cause is logged, not returned
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl From<FieldError> for ValidationErrorDetail {
    fn from(err: FieldError) -> Self {
        Self {
            field: err.field,
            message: err.message,
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::MethodNotAllowed(msg) => write!(f, "Method not allowed: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_code, message, details) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::ValidationError(errors) => (
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Unauthorized(msg) => ("unauthorized", msg, None),
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::MethodNotAllowed(msg) => ("method_not_allowed", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            // Logged where it happened; the cause never reaches the client
            ApiError::InternalError(_) => ("internal_error", INTERNAL_MESSAGE.to_string(), None),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert account errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(fields) => {
                ApiError::ValidationError(fields.into_iter().map(Into::into).collect())
            }
            AuthError::Conflict => ApiError::Conflict("Email already registered".to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()),
            err @ (AuthError::Timeout(_) | AuthError::Internal(_)) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

/// Convert JSON extractor rejections (bad syntax, wrong content type)
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Unknown category".to_string());
        assert_eq!(err.to_string(), "Not found: Unknown category");
    }

    #[test]
    fn test_auth_error_status_table() {
        let cases = [
            (AuthError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (AuthError::Conflict, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Timeout("insert_user"), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_internal_error_is_masked() {
        let err = ApiError::from(AuthError::Internal(
            "Database error: password authentication failed for user \"shop\"".to_string(),
        ));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("password authentication"));
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let err = ApiError::from(AuthError::Validation(vec![FieldError {
            field: "email".to_string(),
            message: "Email is required".to_string(),
        }]));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["details"][0]["field"], "email");
        assert_eq!(body["details"][0]["message"], "Email is required");
    }

    #[tokio::test]
    async fn test_details_omitted_when_absent() {
        let (_, body) = body_json(ApiError::Conflict("Email already registered".to_string())).await;
        assert!(body.get("details").is_none());
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_method_not_allowed_envelope() {
        let err = ApiError::MethodNotAllowed("GET is not supported on /api/auth/login".to_string());
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "method_not_allowed");
        assert_eq!(body["message"], "GET is not supported on /api/auth/login");
    }
}
