//! NATS request/reply transport for the identity registry.
//!
//! Requests are published on the configured subjects with a private reply
//! inbox; payloads are JSON. The connection reconnects forever in the
//! background, so a registry outage surfaces as failed requests and an
//! inactive health probe rather than a dead client.

use async_nats::{connection::State, Client, ConnectOptions, RequestErrorKind};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::errors::{RegistryError, Result};
use crate::traits::IdentityRegistry;
use crate::types::{
    IdRequest, Identity, IdentityQuery, IdentityReply, Lookup, Subjects, User, UserId, UserReply,
};

pub const DEFAULT_MESSAGING_PORT: u16 = 4222;

const RECONNECT_WAIT: Duration = Duration::from_secs(2);

/// Registry client over a NATS connection
#[derive(Clone)]
pub struct NatsRegistry {
    client: Client,
    subjects: Subjects,
}

impl NatsRegistry {
    /// Connect to `nats://{host}:{port}`.
    ///
    /// The first connection attempt must succeed; after that the client
    /// reconnects without limit, waiting two seconds between attempts.
    pub async fn connect(host: &str, port: u16, subjects: Subjects) -> Result<Self> {
        let address = server_address(host, port);
        let client = ConnectOptions::new()
            .max_reconnects(None::<usize>)
            .reconnect_delay_callback(|_attempts| RECONNECT_WAIT)
            .request_timeout(None)
            .connect(address.as_str())
            .await
            .map_err(|e| RegistryError::Connect {
                address: address.clone(),
                reason: e.to_string(),
            })?;

        info!(%address, "connected to messaging server");
        Ok(Self { client, subjects })
    }

    async fn request<Req, Reply>(&self, subject: &str, body: &Req, timeout: Duration) -> Result<Reply>
    where
        Req: Serialize + Sync,
        Reply: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|e| RegistryError::Transport {
            subject: subject.to_string(),
            reason: format!("cannot encode request: {}", e),
        })?;

        let started = Instant::now();
        let call = self.client.request(subject.to_string(), payload.into());
        let reply = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(message)) => {
                serde_json::from_slice::<Reply>(&message.payload).map_err(|e| {
                    RegistryError::Decode {
                        subject: subject.to_string(),
                        reason: e.to_string(),
                    }
                })
            }
            Ok(Err(e)) => Err(match e.kind() {
                RequestErrorKind::TimedOut => RegistryError::Timeout {
                    subject: subject.to_string(),
                    timeout,
                },
                _ => RegistryError::Transport {
                    subject: subject.to_string(),
                    reason: e.to_string(),
                },
            }),
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

impl fmt::Debug for NatsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NatsRegistry")
            .field("subjects", &self.subjects)
            .field("state", &self.client.connection_state())
            .finish()
    }
}

fn server_address(host: &str, port: u16) -> String {
    format!("nats://{}:{}", host, port)
}

#[async_trait]
impl IdentityRegistry for NatsRegistry {
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
        matches!(self.client.connection_state(), State::Connected)
    }
}
