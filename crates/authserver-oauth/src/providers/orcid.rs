//! ORCID OAuth provider implementation.
//!
//! The ORCID token response carries the user's iD, which is needed to build
//! the person document URL. Email addresses are private by default, so the
//! normalized email may be empty.

use serde::Deserialize;
use url::Url;

use super::{decode_profile, join_name, ProfileAdapter, ProviderBase};
use crate::errors::{OAuthError, Result};
use crate::types::{NormalizedUser, ProviderKind, ProviderToken};

#[derive(Debug, Default, Deserialize)]
struct Value {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PersonName {
    #[serde(default)]
    given_names: Option<Value>,
    #[serde(default)]
    family_name: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmailEntry {
    Detailed { email: String },
    Plain(String),
}

#[derive(Debug, Default, Deserialize)]
struct Emails {
    #[serde(default)]
    email: Vec<EmailEntry>,
}

/// v2.1 `/{orcid}/person` document
#[derive(Debug, Deserialize)]
struct OrcidPerson {
    #[serde(default)]
    name: Option<PersonName>,
    #[serde(default)]
    emails: Option<Emails>,
    path: String,
}

/// ORCID OAuth provider
pub struct OrcidProvider {
    base: ProviderBase,
}

impl OrcidProvider {
    pub fn new(base: ProviderBase) -> Self {
        Self { base }
    }
}

impl ProfileAdapter for OrcidProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Orcid
    }

    fn base(&self) -> &ProviderBase {
        &self.base
    }

    fn profile_url(&self, token: &ProviderToken) -> Result<String> {
        let orcid = token
            .extra_str("orcid")
            .filter(|s| !s.is_empty())
            .ok_or(OAuthError::MissingTokenField("orcid"))?;
        let base = &self.base.urls.profile_url;
        let mut url = Url::parse(base)
            .map_err(|e| OAuthError::ProfileRequest(format!("invalid profile url {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| OAuthError::ProfileRequest(format!("profile url {} cannot be a base", base)))?
            .pop_if_empty()
            .push(orcid)
            .push("person");
        Ok(url.into())
    }

    fn normalize(&self, profile: &str) -> Result<NormalizedUser> {
        let person: OrcidPerson = decode_profile(self.kind(), profile)?;
        let name = person.name.unwrap_or_default();
        let given = name.given_names.unwrap_or_default();
        let family = name.family_name.unwrap_or_default();

        let email = person
            .emails
            .and_then(|e| e.email.into_iter().next())
            .map(|entry| match entry {
                EmailEntry::Detailed { email } => email,
                EmailEntry::Plain(email) => email,
            })
            .unwrap_or_default();

        Ok(NormalizedUser {
            name: join_name(&[&given.value, &family.value]),
            email,
            id: person.path,
            provider: self.kind(),
        })
    }
}
