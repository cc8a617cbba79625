//! OAuth provider implementations.

pub mod facebook;
pub mod google;
pub mod linkedin;
pub mod orcid;

pub use facebook::FacebookProvider;
pub use google::GoogleProvider;
pub use linkedin::LinkedInProvider;
pub use orcid::OrcidProvider;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::OAuthClient;
use crate::config::{ProviderUrls, ProvidersSecret};
use crate::errors::{OAuthError, Result};
use crate::params::{OAuthExchangeContext, OAuthParams};
use crate::types::{NormalizedUser, ProviderKind, ProviderToken};

/// Client, secret and URLs an adapter is constructed with
#[derive(Debug, Clone)]
pub struct ProviderBase {
    pub client: OAuthClient,
    pub client_secret: String,
    pub urls: ProviderUrls,
}

impl ProviderBase {
    pub fn new(client: OAuthClient, client_secret: impl Into<String>, urls: ProviderUrls) -> Self {
        Self {
            client,
            client_secret: client_secret.into(),
            urls,
        }
    }
}

/// Stages of turning an authorization code into a [`NormalizedUser`].
///
/// Parameter validation is provider independent ([`OAuthParams::from_form`]);
/// everything after it is dispatched through this trait.
#[async_trait]
pub trait ProfileAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn base(&self) -> &ProviderBase;

    /// Attach this provider's secret and endpoint to validated parameters
    fn exchange_context(&self, params: OAuthParams) -> OAuthExchangeContext {
        let base = self.base();
        OAuthExchangeContext::new(params)
            .with_secret(base.client_secret.clone())
            .with_endpoint(base.urls.endpoint.clone())
    }

    async fn exchange(&self, ctx: &OAuthExchangeContext) -> Result<ProviderToken> {
        self.base().client.exchange_code(ctx).await
    }

    /// Profile document URL for an exchanged token
    fn profile_url(&self, _token: &ProviderToken) -> Result<String> {
        Ok(self.base().urls.profile_url.clone())
    }

    async fn fetch(&self, token: &ProviderToken) -> Result<String> {
        let url = self.profile_url(token)?;
        self.base().client.fetch_profile(&url, token).await
    }

    /// Map the provider's profile document into the normalized shape
    fn normalize(&self, profile: &str) -> Result<NormalizedUser>;
}

/// Decode a provider profile document, tagging failures with the provider
pub(crate) fn decode_profile<T: DeserializeOwned>(kind: ProviderKind, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| OAuthError::ProfileDecode {
        provider: kind,
        reason: e.to_string(),
    })
}

/// Join the non-empty name parts with a single space
pub(crate) fn join_name(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Adapters available to the router, selected by provider tag
#[derive(Clone, Default)]
pub struct ProviderSet {
    adapters: BTreeMap<ProviderKind, Arc<dyn ProfileAdapter>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an adapter for every provider that has a client secret
    pub fn from_secrets(secrets: &ProvidersSecret, client: &OAuthClient) -> Self {
        let mut set = Self::new();
        for kind in ProviderKind::ALL {
            let Some(secret) = secrets.secret_for(kind) else {
                continue;
            };
            let base = ProviderBase::new(client.clone(), secret, ProviderUrls::for_kind(kind));
            let adapter: Arc<dyn ProfileAdapter> = match kind {
                ProviderKind::Google => Arc::new(GoogleProvider::new(base)),
                ProviderKind::Facebook => Arc::new(FacebookProvider::new(base)),
                ProviderKind::LinkedIn => Arc::new(LinkedInProvider::new(base)),
                ProviderKind::Orcid => Arc::new(OrcidProvider::new(base)),
            };
            set.insert(adapter);
        }
        set
    }

    pub fn insert(&mut self, adapter: Arc<dyn ProfileAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn ProfileAdapter>) -> Self {
        self.insert(adapter);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ProfileAdapter>> {
        self.adapters.get(&kind).cloned()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.adapters.keys().copied()
    }
}
