//! OAuth2 provider integration for the token service.
//!
//! This crate provides:
//! - Request parameter validation shared by every provider
//! - A generic authorization code exchange client
//! - Provider adapters (Google, Facebook, LinkedIn, ORCID) that fetch the
//!   provider profile and normalize it into a [`NormalizedUser`]
//!
//! # Security Note
//! Provider access tokens are never persisted. They live for the duration of
//! one request and are dropped once the profile has been fetched.

pub mod client;
pub mod config;
pub mod errors;
pub mod params;
pub mod providers;
pub mod types;

pub use client::OAuthClient;
pub use config::{ProviderEndpoint, ProviderUrls, ProvidersSecret};
pub use errors::{OAuthError, Result};
pub use params::{OAuthExchangeContext, OAuthParams, REQUIRED_PARAMS};
pub use providers::{
    FacebookProvider, GoogleProvider, LinkedInProvider, OrcidProvider, ProfileAdapter,
    ProviderBase, ProviderSet,
};
pub use types::{NormalizedUser, ProviderKind, ProviderToken};
