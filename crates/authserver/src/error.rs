use authserver_oauth::OAuthError;
use authserver_registry::RegistryError;
use authserver_tokens::TokenError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Media type of every JSON-API document this service emits
pub const JSON_API: &str = "application/vnd.api+json";

/// JSON-API error document
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorObject {
    pub status: String,
    pub code: String,
    pub title: String,
    pub detail: String,
}

/// Client-visible failure of a request
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("provider {0} is not supported")]
    UnknownProvider(String),

    #[error("{0}")]
    QueryParam(String),

    /// `rejected` is set when the provider refused the code itself
    #[error("{detail}")]
    OAuthExchange { detail: String, rejected: bool },

    #[error("{0}")]
    UserRetrieval(String),

    #[error("{0}")]
    JsonEncoding(String),

    #[error("{0}")]
    ReqContext(String),

    /// `remote` is set when the registry answered with an error status
    #[error("{detail}")]
    MessagingReply { detail: String, remote: bool },

    /// `challenge` is sent back as the `WWW-Authenticate` header
    #[error("{detail}")]
    Authentication { challenge: String, detail: String },

    #[error("{0}")]
    JwtToken(String),
}

impl ApiError {
    pub fn identity_not_linked(identifier: &str, reason: Option<&str>) -> Self {
        ApiError::Authentication {
            challenge: format!(
                "identity {} is not registered or not linked with dictybase account",
                identifier
            ),
            detail: format!(
                "cannot authenticate identifier {}: {}",
                identifier,
                reason.unwrap_or("not found")
            ),
        }
    }

    pub fn user_not_linked(user_id: i64, reason: Option<&str>) -> Self {
        ApiError::Authentication {
            challenge: "user is not registered or not linked with dictybase account".to_string(),
            detail: format!(
                "cannot authenticate user id {}: {}",
                user_id,
                reason.unwrap_or("not found")
            ),
        }
    }

    pub fn invalid_bearer(detail: impl Into<String>) -> Self {
        ApiError::Authentication {
            challenge: r#"Bearer error="invalid_token""#.to_string(),
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            ApiError::QueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::OAuthExchange { rejected: true, .. } => StatusCode::BAD_REQUEST,
            ApiError::OAuthExchange { rejected: false, .. } => StatusCode::BAD_GATEWAY,
            ApiError::UserRetrieval(_) => StatusCode::BAD_GATEWAY,
            ApiError::JsonEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ReqContext(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MessagingReply { remote: true, .. } => StatusCode::BAD_GATEWAY,
            ApiError::MessagingReply { remote: false, .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::JwtToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnknownProvider(_) => "unknown_provider",
            ApiError::QueryParam(_) => "query_param",
            ApiError::OAuthExchange { .. } => "oauth_exchange",
            ApiError::UserRetrieval(_) => "user_retrieval",
            ApiError::JsonEncoding(_) => "json_encoding",
            ApiError::ReqContext(_) => "request_context",
            ApiError::MessagingReply { .. } => "messaging_reply",
            ApiError::Authentication { .. } => "authentication",
            ApiError::JwtToken(_) => "jwt_token",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::UnknownProvider(_) => "Unknown identity provider",
            ApiError::QueryParam(_) => "Missing or invalid request parameter",
            ApiError::OAuthExchange { .. } => "OAuth code exchange failed",
            ApiError::UserRetrieval(_) => "Unable to retrieve user from provider",
            ApiError::JsonEncoding(_) => "JSON encoding or decoding error",
            ApiError::ReqContext(_) => "Missing request context",
            ApiError::MessagingReply { .. } => "Identity registry error",
            ApiError::Authentication { .. } => "Authentication failed",
            ApiError::JwtToken(_) => "Unable to sign token",
        }
    }
}

/// Header values must be visible ASCII
fn header_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }

        let challenge = match &self {
            ApiError::Authentication { challenge, .. } => Some(header_safe(challenge)),
            _ => None,
        };

        let body = Json(ErrorDocument {
            errors: vec![ErrorObject {
                status: status.as_u16().to_string(),
                code: self.code().to_string(),
                title: self.title().to_string(),
                detail: self.to_string(),
            }],
        });

        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        if let Some(value) = challenge.and_then(|c| HeaderValue::from_str(&c).ok()) {
            headers.insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }
}

impl From<OAuthError> for ApiError {
    fn from(err: OAuthError) -> Self {
        let detail = err.to_string();
        match err {
            OAuthError::MissingParam(_) => ApiError::QueryParam(detail),
            OAuthError::UnknownProvider(name) => ApiError::UnknownProvider(name),
            OAuthError::ExchangeRejected { .. } => ApiError::OAuthExchange {
                detail,
                rejected: true,
            },
            OAuthError::ExchangeFailed(_) | OAuthError::MissingTokenField(_) => {
                ApiError::OAuthExchange {
                    detail,
                    rejected: false,
                }
            }
            OAuthError::ProfileRequest(_) | OAuthError::ProfileStatus { .. } => {
                ApiError::UserRetrieval(detail)
            }
            OAuthError::ProfileDecode { .. } => ApiError::JsonEncoding(detail),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::MessagingReply {
            detail: format!("error in getting registry reply: {}", err),
            remote: false,
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::JwtToken(format!("error in signing jwt token: {}", err))
    }
}
