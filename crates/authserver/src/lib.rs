//! Identity federation gateway.
//!
//! Exchanges OAuth authorization codes from Google, Facebook, LinkedIn and
//! ORCID, confirms the resulting identity against the identity registry and
//! issues RS512 login tokens.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod state;

pub use error::{ApiError, ErrorDocument, JSON_API};
pub use pipeline::IssuedToken;
pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/healthz", get(api::health::health_check))
        // Token issuance and validation
        .route("/tokens/validate", get(api::tokens::validate_token))
        .route("/tokens/:provider", post(api::tokens::create_token))
        // Gateway auth-request hook
        .route("/authorize", post(api::authorize::authorize))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::very_permissive())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
