//! Token issuance pipeline.
//!
//! Stages run strictly in order, each feeding the next:
//! params -> code exchange -> profile fetch -> normalize -> identity lookup
//! -> user existence -> user fetch -> mint. The first failing stage ends the
//! request with its own [`ApiError`]; nothing is retried.

use authserver_oauth::{NormalizedUser, OAuthParams, ProviderKind};
use authserver_registry::{Identity, IdentityQuery, Lookup, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::logging::hash_for_log;
use crate::state::AppState;

/// Response body of a successful token request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub user: User,
    pub identity: Identity,
}

/// Run the whole pipeline for one request
pub async fn issue_token(
    state: &AppState,
    provider: ProviderKind,
    form: &HashMap<String, String>,
) -> Result<IssuedToken, ApiError> {
    let params = OAuthParams::from_form(form)?;

    let adapter = state.providers.get(provider).ok_or_else(|| {
        ApiError::ReqContext(format!("no oauth configuration for provider {}", provider))
    })?;

    let ctx = adapter.exchange_context(params);
    let provider_token = adapter.exchange(&ctx).await?;
    debug!(%provider, "authorization code exchanged");

    let profile = adapter.fetch(&provider_token).await?;
    let user = adapter.normalize(&profile)?;
    debug!(
        %provider,
        identifier = %hash_for_log(user.identity_identifier()),
        "provider profile normalized"
    );

    let identity = confirm_identity(state, &user).await?;
    confirm_user(state, identity.user_id).await?;
    let registry_user = fetch_user(state, identity.user_id).await?;

    let minted = state.minter.mint()?;
    info!(
        %provider,
        user_id = registry_user.id,
        jti = %minted.claims.jti,
        "login token issued"
    );

    Ok(IssuedToken {
        token: minted.token,
        user: registry_user,
        identity,
    })
}

async fn confirm_identity(state: &AppState, user: &NormalizedUser) -> Result<Identity, ApiError> {
    let identifier = user.identity_identifier();
    let query = IdentityQuery {
        provider: user.provider.as_str().to_string(),
        identifier: identifier.to_string(),
    };

    let lookup = within(
        state.registry_timeout,
        "identity lookup",
        state.registry.identity_exists(&query, state.registry_timeout),
    )
    .await?;

    settle(lookup, |reason| {
        warn!(
            provider = %user.provider,
            identifier = %hash_for_log(identifier),
            "identity is not registered"
        );
        ApiError::identity_not_linked(identifier, reason)
    })
}

async fn confirm_user(state: &AppState, user_id: UserId) -> Result<(), ApiError> {
    let lookup = within(
        state.registry_timeout,
        "user existence check",
        state.registry.user_exists(user_id, state.registry_timeout),
    )
    .await?;

    settle(lookup, |reason| {
        warn!(user_id, "linked user does not exist");
        ApiError::user_not_linked(user_id, reason)
    })
}

async fn fetch_user(state: &AppState, user_id: UserId) -> Result<User, ApiError> {
    let lookup = within(
        state.registry_timeout,
        "user fetch",
        state.registry.user_fetch(user_id, state.registry_timeout),
    )
    .await?;

    settle(lookup, |reason| {
        warn!(user_id, "linked user could not be fetched");
        ApiError::user_not_linked(user_id, reason)
    })
}

/// Bound a registry call by its deadline regardless of the transport
async fn within<T, F>(deadline: Duration, what: &str, call: F) -> Result<T, ApiError>
where
    F: Future<Output = authserver_registry::Result<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ApiError::MessagingReply {
            detail: format!("no registry reply for {} within {:?}", what, deadline),
            remote: false,
        }),
    }
}

fn settle<T>(
    lookup: Lookup<T>,
    not_found: impl FnOnce(Option<&str>) -> ApiError,
) -> Result<T, ApiError> {
    match lookup {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound { reason } => Err(not_found(reason.as_deref())),
        Lookup::Remote(status) => Err(ApiError::MessagingReply {
            detail: status.to_string(),
            remote: true,
        }),
    }
}
