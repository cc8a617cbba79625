use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{api::tokens::verify_bearer, error::ApiError, extractors::BearerToken, state::AppState};

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// POST /authorize
///
/// Auth-request hook for the fronting gateway. Only non-GET, non-OPTIONS
/// requests outside `/tokens` need a valid bearer token.
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let scheme = header(&headers, "X-Scheme");
    if scheme != "https" {
        return Ok((
            StatusCode::BAD_REQUEST,
            format!("scheme is {} not https", scheme),
        )
            .into_response());
    }

    match header(&headers, "X-Original-Method") {
        "OPTIONS" => return Ok("passthrough for OPTIONS method".into_response()),
        "GET" => return Ok("passthrough for GET method".into_response()),
        _ => {}
    }

    let original_uri = header(&headers, "X-Original-Uri");
    if original_uri.starts_with("/tokens") {
        return Ok("no validation for /tokens".into_response());
    }

    tracing::debug!(uri = %original_uri, "going for jwt check");
    let BearerToken(token) = BearerToken::from_headers(&headers)?;
    verify_bearer(&state, &token)?;
    Ok("jwt is valid".into_response())
}
