/// Account endpoints
///
/// - `POST /api/auth/signup` - Create an account
/// - `POST /api/auth/login` - Check credentials and return the account profile
///
/// Both respond with the same envelope:
///
/// ```json
/// {
///   "success": true,
///   "message": "Signup successful",
///   "user": {
///     "id": "uuid",
///     "name": "Kim",
///     "email": "kim@x.com",
///     "phone": null,
///     "createdAt": "2025-01-01T00:00:00Z"
///   }
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use printshop_shared::{
    auth::service::{LoginRequest, SignupRequest},
    models::user::UserProfile,
};
use serde::Serialize;

/// Successful signup/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true
    pub success: bool,

    /// Human-readable outcome
    pub message: String,

    /// Account profile, never includes credential material
    pub user: UserProfile,
}

/// Register a new account
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// {
///   "name": "Kim",
///   "email": "kim@x.com",
///   "password": "pw1234",
///   "phone": "010-1234-5678"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty field, bad email, unreadable body
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: store or hashing failure
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let user = state.auth.register(req).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Signup successful".to_string(),
        user,
    }))
}

/// Log in with email and password
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "kim@x.com",
///   "password": "pw1234"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty field, unreadable body
/// - `401 Unauthorized`: unknown email or wrong password (same response for both)
/// - `500 Internal Server Error`: store or hashing failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let user = state.auth.authenticate(req).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    }))
}
