//! LinkedIn OAuth provider implementation.

use serde::Deserialize;

use super::{decode_profile, join_name, ProfileAdapter, ProviderBase};
use crate::errors::Result;
use crate::types::{NormalizedUser, ProviderKind};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkedInUser {
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email_address: String,
}

/// LinkedIn OAuth provider
pub struct LinkedInProvider {
    base: ProviderBase,
}

impl LinkedInProvider {
    pub fn new(base: ProviderBase) -> Self {
        Self { base }
    }
}

impl ProfileAdapter for LinkedInProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LinkedIn
    }

    fn base(&self) -> &ProviderBase {
        &self.base
    }

    fn normalize(&self, profile: &str) -> Result<NormalizedUser> {
        let li: LinkedInUser = decode_profile(self.kind(), profile)?;
        Ok(NormalizedUser {
            name: join_name(&[&li.first_name, &li.last_name]),
            email: li.email_address,
            id: li.id,
            provider: self.kind(),
        })
    }
}
