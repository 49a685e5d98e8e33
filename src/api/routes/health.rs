//! Health Routes
//!
//! Health check endpoints for monitoring and container orchestration.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::menu::MenuTree;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready when the stored menu forms one tree: every item is reachable from
/// a root and no id repeats, so `GET /api/menus` returns all of it.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let store = state.menus.read().await;

    match MenuTree::from_roots(store.list()) {
        Ok(tree) if tree.len() == store.len() => StatusCode::OK,
        Ok(tree) => {
            tracing::warn!(
                stored = store.len(),
                reachable = tree.len(),
                "Menu items unreachable from any root"
            );
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(e) => {
            tracing::warn!(error = %e, "Stored menu does not form a tree");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let menu_items = state.menus.read().await.len();
    let accounts = state.accounts.read().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        menu_items,
        accounts,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
