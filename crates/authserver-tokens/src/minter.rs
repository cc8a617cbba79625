//! Login token issuance.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::claims::{current_timestamp, StandardClaims, DEFAULT_TOKEN_TTL};
use crate::errors::{Result, TokenError};
use crate::keys::RsaKeyPair;

/// Compact RS512 token together with the claims it carries
#[derive(Debug, Clone)]
pub struct MintedToken {
    pub token: String,
    pub claims: StandardClaims,
}

/// Signs login tokens with the service's RSA private key
#[derive(Clone)]
pub struct TokenMinter {
    issuer: String,
    ttl: Duration,
    key: EncodingKey,
}

impl TokenMinter {
    pub fn new(issuer: impl Into<String>, keys: &RsaKeyPair) -> Result<Self> {
        Ok(Self {
            issuer: issuer.into(),
            ttl: DEFAULT_TOKEN_TTL,
            key: keys.encoding_key()?,
        })
    }

    /// Fresh claims issued now
    pub fn claims(&self) -> StandardClaims {
        StandardClaims::issue(&self.issuer, current_timestamp(), self.ttl)
    }

    /// Issue a new token valid from now until now + ttl
    pub fn mint(&self) -> Result<MintedToken> {
        let claims = self.claims();
        let token = self.sign(&claims)?;
        debug!(jti = %claims.jti, exp = claims.exp, "login token minted");
        Ok(MintedToken { token, claims })
    }

    /// Sign an explicit set of claims
    pub fn sign(&self, claims: &StandardClaims) -> Result<String> {
        encode(&Header::new(Algorithm::RS512), claims, &self.key).map_err(TokenError::Signing)
    }
}

impl fmt::Debug for TokenMinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMinter")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
