//! Generic OAuth client for provider interactions.

use reqwest::{header::ACCEPT, Client};
use tracing::debug;

use crate::errors::{OAuthError, Result};
use crate::params::OAuthExchangeContext;
use crate::types::ProviderToken;

/// OAuth client for provider interactions.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http_client: Client,
}

impl OAuthClient {
    /// Create a new OAuth client with default settings
    pub fn new() -> Self {
        Self::from_client(Client::new())
    }

    /// Wrap a preconfigured HTTP client (timeouts, proxies, TLS)
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Exchange authorization code for access token
    pub async fn exchange_code(&self, ctx: &OAuthExchangeContext) -> Result<ProviderToken> {
        let endpoint = ctx
            .endpoint
            .as_ref()
            .ok_or_else(|| OAuthError::ExchangeFailed("no token endpoint configured".to_string()))?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", ctx.params.code.as_str()),
            ("redirect_uri", ctx.params.redirect_url.as_str()),
            ("client_id", ctx.params.client_id.as_str()),
            ("client_secret", ctx.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&endpoint.token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::ExchangeFailed(format!("request error: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::ExchangeRejected {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::ExchangeFailed(format!(
                "token endpoint returned status {}: {}",
                status, body
            )));
        }

        let token: ProviderToken = response.json().await.map_err(|e| {
            OAuthError::ExchangeFailed(format!("failed to parse token response: {}", e))
        })?;

        if token.access_token.is_empty() {
            return Err(OAuthError::MissingTokenField("access_token"));
        }

        debug!(token_url = %endpoint.token_url, "authorization code exchanged");
        Ok(token)
    }

    /// Fetch the raw profile document with the provider access token
    pub async fn fetch_profile(&self, url: &str, token: &ProviderToken) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| OAuthError::ProfileRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::ProfileStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| OAuthError::ProfileRequest(format!("failed to read body: {}", e)))
    }
}

impl Default for OAuthClient {
    fn default() -> Self {
        Self::new()
    }
}
