//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The directory could not be read
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "directory": { "status": "ok", "message": "16 charities" },
///     "admission": { "status": "ok", "message": "3 rate windows, 1 suspicion records" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let directory = check_directory(&state).await;
    let admission = check_admission(&state);

    let healthy = directory.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            directory,
            admission,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_directory(state: &AppState) -> CheckStatus {
    match state.charity_service.count().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{count} charities")),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Directory error: {e}")),
        },
    }
}

/// Reports how much per-client state the admission layer is holding.
fn check_admission(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!(
            "{} rate windows, {} suspicion records",
            state.rate_limiter.tracked(),
            state.anomaly_flagger.tracked()
        )),
    }
}
