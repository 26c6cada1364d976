//! Liveness endpoint.
//!
//! Saves and uploads need both the database and a writable asset store, so
//! the report covers both.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is usable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub asset_storage: bool,
}

/// GET /health
///
/// Responds 503 while degraded so load balancers stop routing saves here.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match studio_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };
    let asset_storage = match state.assets.check_writable().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: asset storage unwritable");
            false
        }
    };

    let (code, status) = if database && asset_storage {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            asset_storage,
        }),
    )
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
