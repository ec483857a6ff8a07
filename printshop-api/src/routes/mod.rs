/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and login
/// - `catalog`: Product category taxonomy

pub mod auth;
pub mod catalog;
pub mod health;

use crate::error::ApiError;
use axum::{
    extract::OriginalUri,
    http::{Method, Uri},
};

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} is not supported on {}", method, uri.path()))
}
