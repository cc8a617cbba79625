use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Lifetime of a login token
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(240 * 60 * 60);

/// Audience every login token is issued for
pub const AUDIENCE: &str = "user";

/// Seconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Registered JWT claims carried by a login token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    pub iss: String, // Issuer
    pub sub: String, // Subject
    pub aud: String, // Audience
    pub iat: u64,    // Issued at
    pub nbf: u64,    // Not before
    pub exp: u64,    // Expiration
    pub jti: String, // JWT ID
}

impl StandardClaims {
    /// Claims for a token issued by `issuer` at `now`.
    ///
    /// `jti` is a random v4 UUID, never a counter.
    pub fn issue(issuer: &str, now: u64, ttl: Duration) -> Self {
        Self {
            iss: issuer.to_string(),
            sub: format!("{} login token", issuer),
            aud: AUDIENCE.to_string(),
            iat: now,
            nbf: now,
            exp: now + ttl.as_secs(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
