//! Google OAuth provider implementation.

use serde::Deserialize;

use super::{decode_profile, ProfileAdapter, ProviderBase};
use crate::errors::Result;
use crate::types::{NormalizedUser, ProviderKind};

/// Google userinfo v2 document
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

/// Google OAuth provider
pub struct GoogleProvider {
    base: ProviderBase,
}

impl GoogleProvider {
    pub fn new(base: ProviderBase) -> Self {
        Self { base }
    }
}

impl ProfileAdapter for GoogleProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn base(&self) -> &ProviderBase {
        &self.base
    }

    fn normalize(&self, profile: &str) -> Result<NormalizedUser> {
        let google: GoogleUser = decode_profile(self.kind(), profile)?;
        Ok(NormalizedUser {
            name: google.name,
            email: google.email,
            id: google.id,
            provider: self.kind(),
        })
    }
}
