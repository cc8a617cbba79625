//! HTTP request/reply transport for the identity registry.
//!
//! Each subject is a path under the registry base URL; requests and replies
//! are JSON. One pooled client is shared by all in-flight requests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::errors::{RegistryError, Result};
use crate::traits::IdentityRegistry;
use crate::types::{
    IdRequest, Identity, IdentityQuery, IdentityReply, Lookup, Subjects, User, UserId, UserReply,
};

/// Registry client over HTTP
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    subjects: Subjects,
    probe_timeout: Duration,
}

impl HttpRegistry {
    pub fn new(base_url: &str, subjects: Subjects) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| RegistryError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegistryError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            subjects,
            probe_timeout: Duration::from_secs(2),
        })
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    fn subject_url(&self, subject: &str) -> String {
        format!("{}/{}", self.base_url, subject)
    }

    async fn request<Req, Reply>(&self, subject: &str, body: &Req, timeout: Duration) -> Result<Reply>
    where
        Req: Serialize + Sync,
        Reply: DeserializeOwned,
    {
        let started = Instant::now();
        let call = async {
            let response = self
                .client
                .post(self.subject_url(subject))
                .json(body)
                .send()
                .await
                .map_err(|e| RegistryError::Transport {
                    subject: subject.to_string(),
                    reason: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(RegistryError::Transport {
                    subject: subject.to_string(),
                    reason: format!("registry returned status {}", status),
                });
            }

            response
                .json::<Reply>()
                .await
                .map_err(|e| RegistryError::Decode {
                    subject: subject.to_string(),
                    reason: e.to_string(),
                })
        };

        let reply = match tokio::time::timeout(timeout, call).await {
            Ok(reply) => reply,
            Err(_) => Err(RegistryError::Timeout {
                subject: subject.to_string(),
                timeout,
            }),
        };

        match &reply {
            Ok(_) => debug!(
                subject,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "registry reply received"
            ),
            Err(e) => warn!(subject, error = %e, "registry request failed"),
        }
        reply
    }
}

#[async_trait]
impl IdentityRegistry for HttpRegistry {
    async fn identity_exists(
        &self,
        query: &IdentityQuery,
        timeout: Duration,
    ) -> Result<Lookup<Identity>> {
        let subject = &self.subjects.identity_exists;
        let reply: IdentityReply = self.request(subject, query, timeout).await?;
        reply.into_lookup(subject)
    }

    async fn user_exists(&self, id: UserId, timeout: Duration) -> Result<Lookup<()>> {
        let subject = &self.subjects.user_exists;
        let reply: UserReply = self.request(subject, &IdRequest { id }, timeout).await?;
        reply.into_exists(subject)
    }

    async fn user_fetch(&self, id: UserId, timeout: Duration) -> Result<Lookup<User>> {
        let subject = &self.subjects.user_get;
        let reply: UserReply = self.request(subject, &IdRequest { id }, timeout).await?;
        reply.into_user(subject)
    }

    async fn is_active(&self) -> bool {
        let probe = self
            .client
            .get(self.subject_url("healthz"))
            .timeout(self.probe_timeout)
            .send()
            .await;
        match probe {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "registry probe failed");
                false
            }
        }
    }
}
