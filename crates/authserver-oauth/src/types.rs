//! Provider-agnostic types shared by every adapter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::OAuthError;

/// Supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Facebook,
    LinkedIn,
    Orcid,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Google,
        ProviderKind::Facebook,
        ProviderKind::LinkedIn,
        ProviderKind::Orcid,
    ];

    /// Get provider name as used in routes and registry queries
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Facebook => "facebook",
            ProviderKind::LinkedIn => "linkedin",
            ProviderKind::Orcid => "orcid",
        }
    }

    /// Identifier the identity registry indexes this provider's accounts by.
    ///
    /// ORCID does not expose email by default, so ORCID identities are keyed
    /// by the ORCID path instead of the email address.
    pub fn identity_identifier<'a>(&self, user: &'a NormalizedUser) -> &'a str {
        match self {
            ProviderKind::Orcid => &user.id,
            _ => &user.email,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "facebook" => Ok(ProviderKind::Facebook),
            "linkedin" => Ok(ProviderKind::LinkedIn),
            "orcid" => Ok(ProviderKind::Orcid),
            _ => Err(OAuthError::UnknownProvider(s.to_string())),
        }
    }
}

/// Profile data normalized across providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUser {
    pub name: String,
    pub email: String,
    pub id: String,
    pub provider: ProviderKind,
}

impl NormalizedUser {
    /// Identifier used when asking the registry whether this identity exists
    pub fn identity_identifier(&self) -> &str {
        self.provider.identity_identifier(self)
    }
}

/// Token endpoint response
#[derive(Clone, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Provider specific fields (ORCID returns the user's `orcid` here)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ProviderToken {
    /// Look up a provider specific string field of the token response
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}

impl fmt::Debug for ProviderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}
