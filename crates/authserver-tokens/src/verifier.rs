//! Login token verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::fmt;

use crate::claims::{StandardClaims, AUDIENCE};
use crate::errors::{Result, TokenError};
use crate::keys::RsaKeyPair;

/// Checks signature, algorithm and validity window of login tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(issuer: &str, keys: &RsaKeyPair) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::RS512);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Ok(Self {
            key: keys.decoding_key()?,
            validation,
        })
    }

    /// Verify a compact token; the claims are not handed back to callers
    pub fn verify(&self, token: &str) -> Result<()> {
        decode::<StandardClaims>(token, &self.key, &self.validation)
            .map(|_| ())
            .map_err(TokenError::Rejected)
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
