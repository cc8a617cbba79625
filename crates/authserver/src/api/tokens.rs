use authserver_oauth::ProviderKind;
use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{ApiError, JSON_API},
    extractors::BearerToken,
    pipeline,
    state::AppState,
};

/// POST /tokens/:provider
pub async fn create_token(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let provider: ProviderKind = provider.parse()?;
    let form = request_form(query.as_deref(), &headers, &body);

    let issued = pipeline::issue_token(&state, provider, &form).await?;
    let body = serde_json::to_vec(&issued).map_err(|e| ApiError::JsonEncoding(e.to_string()))?;

    Ok(([(CONTENT_TYPE, HeaderValue::from_static(JSON_API))], body).into_response())
}

/// GET /tokens/validate
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<&'static str, ApiError> {
    verify_bearer(&state, &token)?;
    Ok("jwt is valid")
}

pub(crate) fn verify_bearer(state: &AppState, token: &str) -> Result<(), ApiError> {
    state.verifier.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        ApiError::invalid_bearer(e.to_string())
    })
}

/// Merge query string and urlencoded body parameters; body values win
fn request_form(query: Option<&str>, headers: &HeaderMap, body: &[u8]) -> HashMap<String, String> {
    let mut form: HashMap<String, String> = query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    if is_form_body(headers) {
        form.extend(url::form_urlencoded::parse(body).into_owned());
    }
    form
}

fn is_form_body(headers: &HeaderMap) -> bool {
    match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some(content_type) => content_type
            .to_ascii_lowercase()
            .starts_with("application/x-www-form-urlencoded"),
        None => true,
    }
}
