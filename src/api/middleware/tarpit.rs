//! Anti-burst middleware: burst detection and tarpit delays.

use axum::{
    extract::{Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};

use super::client;
use crate::state::AppState;

/// Records the request in the client's burst window and slows down clients
/// that look automated.
///
/// Flagged clients wait a random delay between `TARPIT_MIN_MS` and
/// `TARPIT_MAX_MS`; unflagged clients with a crawler-like user agent wait the
/// minimum. The request is never rejected here.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let client = client::resolve(&st, &mut req);
    let suspicious = st.anomaly_flagger.record_burst(&client.identity);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok());

    if let Some(delay) = st.tarpit.delay_for(suspicious, user_agent) {
        tracing::debug!(
            identity = %client.identity,
            delay_ms = delay.as_millis() as u64,
            "Tarpitting request"
        );
        tokio::time::sleep(delay).await;
    }

    next.run(req).await
}
