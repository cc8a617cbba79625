//! Request parameter stage shared by all providers.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::config::ProviderEndpoint;
use crate::errors::{OAuthError, Result};

/// Parameters every token request must carry, in validation order
pub const REQUIRED_PARAMS: [&str; 5] = ["client_id", "scopes", "redirect_url", "state", "code"];

/// Validated request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParams {
    pub client_id: String,
    pub redirect_url: String,
    pub scopes: BTreeSet<String>,
    pub state: String,
    pub code: String,
}

impl OAuthParams {
    /// Build parameters from decoded form/query values.
    ///
    /// Fails on the first required parameter that is absent or empty.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self> {
        let field = |name: &'static str| -> Result<String> {
            form.get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(OAuthError::MissingParam(name))
        };

        let client_id = field(REQUIRED_PARAMS[0])?;
        let scopes = field(REQUIRED_PARAMS[1])?;
        let redirect_url = field(REQUIRED_PARAMS[2])?;
        let state = field(REQUIRED_PARAMS[3])?;
        let code = field(REQUIRED_PARAMS[4])?;

        Ok(Self {
            client_id,
            redirect_url,
            scopes: scopes
                .split(' ')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            state,
            code,
        })
    }
}

/// Everything the token endpoint call needs.
///
/// Built from [`OAuthParams`]; the adapter attaches its client secret and
/// endpoint before the exchange.
#[derive(Clone)]
pub struct OAuthExchangeContext {
    pub params: OAuthParams,
    pub client_secret: String,
    pub endpoint: Option<ProviderEndpoint>,
}

impl OAuthExchangeContext {
    pub fn new(params: OAuthParams) -> Self {
        Self {
            params,
            client_secret: String::new(),
            endpoint: None,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = secret.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: ProviderEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

impl fmt::Debug for OAuthExchangeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthExchangeContext")
            .field("client_id", &self.params.client_id)
            .field("redirect_url", &self.params.redirect_url)
            .field("scopes", &self.params.scopes)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
