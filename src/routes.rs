//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/charities/*` - Charity directory API
//! - `GET /health`  - Health check
//! - anything else  - JSON `404 Not Found`
//!
//! # Middleware
//!
//! Outermost first: tracing, security headers, honeypot, rate limiting,
//! anti-burst tarpit, fingerprinting, access logging. The chain also covers
//! unmatched routes. Trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{
    access_log, fingerprint, honeypot, rate_limit, security_headers, tarpit, tracing,
};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and middleware layer.
///
/// Layers added later wrap the earlier ones, so they are listed innermost
/// first.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::charity_routes())
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            fingerprint::layer,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), tarpit::layer))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            honeypot::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
