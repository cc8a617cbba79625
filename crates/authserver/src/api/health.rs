use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use crate::state::AppState;

/// GET /healthz
///
/// Healthy only while the identity registry answers its liveness probe.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.registry.is_active().await {
        (StatusCode::OK, "okay")
    } else {
        tracing::warn!("identity registry is unreachable");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "identity registry is disconnected",
        )
    }
}
