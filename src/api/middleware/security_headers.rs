//! Security response headers middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Attaches the configured security headers to every response, including
/// responses produced by inner middleware.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    st.security_headers.apply(response.headers_mut());
    response
}
