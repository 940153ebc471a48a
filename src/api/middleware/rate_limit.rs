//! Rate limiting middleware with exponential penalty windows.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use super::client;
use crate::error::AppError;
use crate::security::Admission;
use crate::security::rate_limiter::retry_after_secs;
use crate::state::AppState;

/// Admits or rejects the request against the client's rate window.
///
/// # Limits
///
/// Configured via `RATE_LIMIT_MAX` and `RATE_LIMIT_WINDOW_SECS`
/// (default: 100 requests per 15 minutes). A limit of `0` disables the check.
///
/// Admitted responses carry `x-ratelimit-limit` and `x-ratelimit-remaining`.
///
/// # Errors
///
/// Returns `429 Too Many Requests` with a `Retry-After` header once the
/// window is exhausted. Every rejection doubles the client's remaining
/// window (up to the configured cap) and flags it as suspicious.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = st.rate_limiter.policy().limit;
    if limit == 0 {
        return Ok(next.run(req).await);
    }

    let client = client::resolve(&st, &mut req);

    match st.rate_limiter.check(&client.identity) {
        Admission::Admitted { remaining } => {
            let mut response = next.run(req).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            Ok(response)
        }
        Admission::Rejected { retry_after } => {
            let retry_after = retry_after_secs(retry_after);
            st.anomaly_flagger.flag(&client.identity);
            tracing::warn!(
                identity = %client.identity,
                retry_after,
                "Rate limit exceeded"
            );
            Err(AppError::rate_limited(retry_after))
        }
    }
}
