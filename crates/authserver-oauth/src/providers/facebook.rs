//! Facebook OAuth provider implementation.

use serde::{Deserialize, Deserializer};

use super::{decode_profile, ProfileAdapter, ProviderBase};
use crate::errors::Result;
use crate::types::{NormalizedUser, ProviderKind};

/// Graph API `/me?fields=name,email` document
#[derive(Debug, Deserialize)]
struct FacebookUser {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

// Older Graph API versions return the user id as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

/// Facebook OAuth provider
pub struct FacebookProvider {
    base: ProviderBase,
}

impl FacebookProvider {
    pub fn new(base: ProviderBase) -> Self {
        Self { base }
    }
}

impl ProfileAdapter for FacebookProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Facebook
    }

    fn base(&self) -> &ProviderBase {
        &self.base
    }

    fn normalize(&self, profile: &str) -> Result<NormalizedUser> {
        let fb: FacebookUser = decode_profile(self.kind(), profile)?;
        Ok(NormalizedUser {
            name: fb.name,
            email: fb.email,
            id: fb.id,
            provider: self.kind(),
        })
    }
}
