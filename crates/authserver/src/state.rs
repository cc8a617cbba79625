use anyhow::Result;
use authserver_oauth::{OAuthClient, ProviderSet};
use authserver_registry::{HttpRegistry, IdentityRegistry, NatsRegistry};
use authserver_tokens::{RsaKeyPair, TokenMinter, TokenVerifier};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, RegistryTransport};

pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Only configured providers are present
    pub providers: ProviderSet,
    pub registry: Arc<dyn IdentityRegistry>,
    pub minter: TokenMinter,
    pub verifier: TokenVerifier,
    /// Deadline applied to every registry round trip
    pub registry_timeout: Duration,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.provider_timeout)
            .build()?;
        let providers = ProviderSet::from_secrets(
            &config.providers_secret,
            &OAuthClient::from_client(http_client),
        );
        let registry: Arc<dyn IdentityRegistry> = match &config.registry {
            RegistryTransport::Nats { host, port } => {
                Arc::new(NatsRegistry::connect(host, *port, config.subjects.clone()).await?)
            }
            RegistryTransport::Http { url } => {
                Arc::new(HttpRegistry::new(url, config.subjects.clone())?)
            }
        };

        let state = Self::from_parts(providers, registry, &config.issuer, &config.keys)?
            .with_registry_timeout(config.registry_timeout);
        Ok(state)
    }

    /// Assemble state from already built collaborators
    pub fn from_parts(
        providers: ProviderSet,
        registry: Arc<dyn IdentityRegistry>,
        issuer: &str,
        keys: &RsaKeyPair,
    ) -> Result<Self> {
        Ok(AppState {
            providers,
            registry,
            minter: TokenMinter::new(issuer, keys)?,
            verifier: TokenVerifier::new(issuer, keys)?,
            registry_timeout: DEFAULT_REGISTRY_TIMEOUT,
        })
    }

    pub fn with_registry_timeout(mut self, timeout: Duration) -> Self {
        self.registry_timeout = timeout;
        self
    }
}
