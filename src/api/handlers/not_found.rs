//! Fallback handler for unmatched routes.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// The generic not-found error, also returned for honeypot paths.
pub fn route_not_found(path: &str) -> AppError {
    AppError::not_found("Resource not found", json!({ "path": path }))
}

/// Returns the JSON not-found body for any route without a handler.
pub async fn not_found_handler(uri: Uri) -> AppError {
    route_not_found(uri.path())
}
