//! Access logging middleware.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{SecondsFormat, Utc};

use super::client;
use crate::state::AppState;

/// Logs one line per handled request under the `access` target.
///
/// # Log Format
///
/// ```text
/// INFO access: 2026-01-01T12:00:00.000Z GET /charities 200 3ms - client: 1a2b3c4d...
/// ```
///
/// The client is identified by its truncated identity digest. Raw addresses
/// are never logged.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let client = client::resolve(&st, &mut req);
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        target: "access",
        "{timestamp} {method} {path} {status} {ms}ms - client: {identity}",
        identity = client.identity,
    );

    response
}
