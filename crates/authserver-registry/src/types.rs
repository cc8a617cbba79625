//! Registry request, reply and result types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{RegistryError, Result};

pub type UserId = i64;

/// Which federated identity to look up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityQuery {
    pub provider: String,
    pub identifier: String,
}

/// Federated identity as stored by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub provider: String,
    pub identifier: String,
    pub user_id: UserId,
}

/// Registry user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Subject names the registry answers on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subjects {
    pub identity_exists: String,
    pub user_exists: String,
    pub user_get: String,
}

impl Default for Subjects {
    fn default() -> Self {
        Self {
            identity_exists: "IdentityService.GetIdentity".to_string(),
            user_exists: "UserService.Exist".to_string(),
            user_get: "UserService.Get".to_string(),
        }
    }
}

/// Error status reported by the registry itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl RemoteStatus {
    /// gRPC `NOT_FOUND`
    pub const NOT_FOUND: i32 = 5;

    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code = {} desc = {}", self.code, self.message)
    }
}

/// Authoritative registry answer
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// The registry does not know the identity or user
    NotFound { reason: Option<String> },
    /// The registry ran but reported an error
    Remote(RemoteStatus),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Request body for user subjects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: UserId,
}

/// Reply to an identity lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityReply {
    #[serde(default)]
    pub exist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RemoteStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// Reply to a user existence check or fetch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserReply {
    #[serde(default)]
    pub exist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RemoteStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl IdentityReply {
    pub fn into_lookup(self, subject: &str) -> Result<Lookup<Identity>> {
        classify(subject, self.exist, self.status, self.identity, "identity")
    }
}

impl UserReply {
    /// Existence check; the reply need not carry the user
    pub fn into_exists(self, subject: &str) -> Result<Lookup<()>> {
        classify(subject, self.exist, self.status, Some(()), "user")
    }

    pub fn into_user(self, subject: &str) -> Result<Lookup<User>> {
        classify(subject, self.exist, self.status, self.user, "user")
    }
}

fn classify<T>(
    subject: &str,
    exist: bool,
    status: Option<RemoteStatus>,
    payload: Option<T>,
    what: &str,
) -> Result<Lookup<T>> {
    match (status, exist) {
        (Some(status), false) if status.is_not_found() => Ok(Lookup::NotFound {
            reason: Some(status.message),
        }),
        (Some(status), _) => Ok(Lookup::Remote(status)),
        (None, false) => Ok(Lookup::NotFound { reason: None }),
        (None, true) => payload.map(Lookup::Found).ok_or_else(|| RegistryError::Decode {
            subject: subject.to_string(),
            reason: format!("reply reports {} exists but carries none", what),
        }),
    }
}
