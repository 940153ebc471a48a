//! Request fingerprint middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::client;
use crate::security::RequestFingerprint;
use crate::state::AppState;

/// Attaches a [`RequestFingerprint`] to the request extensions and logs
/// requests from flagged clients under their fingerprint.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let client = client::resolve(&st, &mut req);
    let fingerprint = RequestFingerprint::from_headers(req.headers(), &client.ip);

    if st.anomaly_flagger.is_suspicious(&client.identity) {
        tracing::warn!(
            fingerprint = %fingerprint.short(),
            identity = %client.identity,
            "Suspicious activity detected"
        );
    }

    req.extensions_mut().insert(fingerprint);
    next.run(req).await
}
