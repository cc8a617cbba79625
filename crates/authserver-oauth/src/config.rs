//! Provider endpoints and client secrets.

use serde::Deserialize;
use std::fmt;

use crate::types::ProviderKind;

/// Client secrets keyed by provider name.
///
/// The expected file format is
/// ```json
/// { "google": "xxxxxxxx", "facebook": "xxxxxxxx", "orcid": "xxxxxxxx" }
/// ```
#[derive(Clone, Default, Deserialize)]
pub struct ProvidersSecret {
    #[serde(default)]
    pub google: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub orcid: String,
    /// Accepted for compatibility with existing secret files; no adapter uses it
    #[serde(default)]
    pub github: String,
}

impl ProvidersSecret {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Secret for a provider, `None` when absent or empty
    pub fn secret_for(&self, kind: ProviderKind) -> Option<&str> {
        let secret = match kind {
            ProviderKind::Google => &self.google,
            ProviderKind::Facebook => &self.facebook,
            ProviderKind::LinkedIn => &self.linkedin,
            ProviderKind::Orcid => &self.orcid,
        };
        (!secret.is_empty()).then_some(secret.as_str())
    }
}

impl fmt::Debug for ProvidersSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let configured: Vec<&str> = ProviderKind::ALL
            .iter()
            .filter(|k| self.secret_for(**k).is_some())
            .map(|k| k.as_str())
            .collect();
        f.debug_struct("ProvidersSecret")
            .field("configured", &configured)
            .finish()
    }
}

/// OAuth2 authorization and token endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub auth_url: String,
    pub token_url: String,
}

/// Every URL an adapter talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUrls {
    pub endpoint: ProviderEndpoint,
    /// Profile endpoint. For ORCID this is the API base the iD is appended to.
    pub profile_url: String,
}

impl ProviderUrls {
    pub fn google() -> Self {
        Self {
            endpoint: ProviderEndpoint {
                auth_url: "https://accounts.google.com/o/oauth2/auth".to_string(),
                token_url: "https://oauth2.googleapis.com/token".to_string(),
            },
            profile_url: "https://www.googleapis.com/userinfo/v2/me".to_string(),
        }
    }

    pub fn facebook() -> Self {
        Self {
            endpoint: ProviderEndpoint {
                auth_url: "https://www.facebook.com/v3.2/dialog/oauth".to_string(),
                token_url: "https://graph.facebook.com/v3.2/oauth/access_token".to_string(),
            },
            profile_url: "https://graph.facebook.com/v2.5/me?fields=name,email".to_string(),
        }
    }

    pub fn linkedin() -> Self {
        Self {
            endpoint: ProviderEndpoint {
                auth_url: "https://www.linkedin.com/oauth/v2/authorization".to_string(),
                token_url: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            },
            profile_url:
                "https://api.linkedin.com/v1/people/~:(id,first-name,last-name,email-address)?format=json"
                    .to_string(),
        }
    }

    pub fn orcid() -> Self {
        Self {
            endpoint: ProviderEndpoint {
                auth_url: "https://orcid.org/oauth/authorize".to_string(),
                token_url: "https://orcid.org/oauth/token".to_string(),
            },
            profile_url: "https://pub.orcid.org/v2.1".to_string(),
        }
    }

    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Google => Self::google(),
            ProviderKind::Facebook => Self::facebook(),
            ProviderKind::LinkedIn => Self::linkedin(),
            ProviderKind::Orcid => Self::orcid(),
        }
    }
}
