//! OAuth error types.

use thiserror::Error;

use crate::types::ProviderKind;

/// Errors raised while exchanging a code or fetching a provider profile
#[derive(Debug, Error)]
pub enum OAuthError {
    /// A required request parameter was absent or empty
    #[error("missing param {0:?}")]
    MissingParam(&'static str),

    /// Provider name is not one of the supported providers
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// Provider refused the authorization code (4xx from the token endpoint)
    #[error("token exchange rejected with status {status}: {body}")]
    ExchangeRejected { status: u16, body: String },

    /// Token endpoint unreachable, failed, or answered with an unreadable body
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    /// Token response decoded but lacks a field this provider needs
    #[error("token response is missing {0:?}")]
    MissingTokenField(&'static str),

    /// Profile endpoint unreachable
    #[error("profile request failed: {0}")]
    ProfileRequest(String),

    /// Profile endpoint answered with a non-success status
    #[error("profile request returned status {status}: {body}")]
    ProfileStatus { status: u16, body: String },

    /// Profile document does not match the provider's expected shape
    #[error("failed to decode {provider} profile: {reason}")]
    ProfileDecode {
        provider: ProviderKind,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, OAuthError>;
