//! RSA key material in PEM form.

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fmt;
use std::path::Path;

use crate::errors::{Result, TokenError};

/// PEM encoded RSA key pair used to sign and verify login tokens.
///
/// The private key may be PKCS#1 or PKCS#8, the public key SPKI or PKCS#1.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_pem: Vec<u8>,
    public_pem: Vec<u8>,
}

impl RsaKeyPair {
    /// Build from in-memory PEM, parsing both halves up front
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self> {
        let pair = Self {
            private_pem: private_pem.to_vec(),
            public_pem: public_pem.to_vec(),
        };
        pair.encoding_key()?;
        pair.decoding_key()?;
        Ok(pair)
    }

    /// Read and parse the private and public key files
    pub fn load(private_path: &Path, public_path: &Path) -> Result<Self> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|source| TokenError::KeyFile {
                path: path.to_path_buf(),
                source,
            })
        };
        let private_pem = read(private_path)?;
        let public_pem = read(public_path)?;
        Self::from_pem(&private_pem, &public_pem)
    }

    pub fn encoding_key(&self) -> Result<EncodingKey> {
        EncodingKey::from_rsa_pem(&self.private_pem).map_err(TokenError::InvalidKey)
    }

    pub fn decoding_key(&self) -> Result<DecodingKey> {
        DecodingKey::from_rsa_pem(&self.public_pem).map_err(TokenError::InvalidKey)
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair").finish_non_exhaustive()
    }
}
