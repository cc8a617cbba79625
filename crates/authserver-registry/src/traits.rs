use async_trait::async_trait;
use std::time::Duration;

use crate::errors::Result;
use crate::types::{Identity, IdentityQuery, Lookup, User, UserId};

/// Asynchronous request/reply view of the identity registry.
///
/// Implementations must be safe to share across concurrent requests.
/// Dropping a returned future abandons the call; no reply is awaited after
/// that point.
#[async_trait]
pub trait IdentityRegistry: Send + Sync {
    /// Look up a federated identity and the user it is linked to
    async fn identity_exists(
        &self,
        query: &IdentityQuery,
        timeout: Duration,
    ) -> Result<Lookup<Identity>>;

    /// Check that a user id is known to the registry
    async fn user_exists(&self, id: UserId, timeout: Duration) -> Result<Lookup<()>>;

    /// Fetch a user by id
    async fn user_fetch(&self, id: UserId, timeout: Duration) -> Result<Lookup<User>>;

    /// Live connectivity probe
    async fn is_active(&self) -> bool;
}
