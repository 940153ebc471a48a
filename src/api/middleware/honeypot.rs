//! Honeypot middleware for vulnerability scanners.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::client;
use crate::api::handlers::route_not_found;
use crate::state::AppState;

/// Traps requests for well-known scanner paths.
///
/// # Behavior
///
/// When the path matches a honeypot pattern:
/// 1. The client is flagged as suspicious
/// 2. The response is held back for the configured honeypot delay
/// 3. A generic `404 Not Found` body is returned
///
/// Later middleware and handlers never run for such requests. The query
/// string is not inspected.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    if !st.honeypot.matches(&path) {
        return next.run(req).await;
    }

    let client = client::resolve(&st, &mut req);
    st.anomaly_flagger.record_honeypot_hit(&client.identity);
    tracing::warn!(identity = %client.identity, path = %path, "Honeypot triggered");

    tokio::time::sleep(st.honeypot_delay).await;

    route_not_found(&path).into_response()
}
