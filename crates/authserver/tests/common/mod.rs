//! Stub provider, fake registry and request helpers shared by server tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use authserver::{create_router, AppState};
use authserver_oauth::{
    NormalizedUser, OAuthClient, OAuthExchangeContext, ProfileAdapter, ProviderBase,
    ProviderKind, ProviderSet, ProviderToken, ProvidersSecret,
};
use authserver_registry::{
    Identity, IdentityQuery, IdentityRegistry, Lookup, RegistryError, RemoteStatus, User, UserId,
};
use authserver_tokens::{RsaKeyPair, TokenMinter};

pub const ISSUER: &str = "dictyBase";

pub const FULL_FORM: &str = "client_id=cid&scopes=email+profile\
    &redirect_url=https%3A%2F%2Fapp.example.com%2Fcallback&state=xyz&code=4%2Fabc";

pub const GOOGLE_PROFILE: &str = r#"{"name":"Ann Lee","email":"ann@example.com","id":"42"}"#;

pub const ORCID_PERSON: &str = r#"{
    "name": {
        "given-names": {"value": "Josiah"},
        "family-name": {"value": "Carberry"}
    },
    "emails": {"email": [], "path": "/0000-0002-1825-0097/email"},
    "path": "/0000-0002-1825-0097/person"
}"#;

pub fn test_keys() -> RsaKeyPair {
    RsaKeyPair::from_pem(
        include_bytes!("../../testdata/private.pem"),
        include_bytes!("../../testdata/public.pem"),
    )
    .unwrap()
}

pub fn test_minter() -> TokenMinter {
    TokenMinter::new(ISSUER, &test_keys()).unwrap()
}

/// Provider adapter answering with a canned profile instead of calling out.
///
/// Normalization is delegated to the real adapter for the same provider.
pub struct StubProvider {
    real: Arc<dyn ProfileAdapter>,
    profile: String,
    pub exchanges: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new(kind: ProviderKind, profile: &str) -> Self {
        let secrets = ProvidersSecret::from_json(&format!(r#"{{"{}": "secret"}}"#, kind)).unwrap();
        let real = ProviderSet::from_secrets(&secrets, &OAuthClient::new())
            .get(kind)
            .unwrap();
        Self {
            real,
            profile: profile.to_string(),
            exchanges: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ProfileAdapter for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.real.kind()
    }

    fn base(&self) -> &ProviderBase {
        self.real.base()
    }

    async fn exchange(&self, ctx: &OAuthExchangeContext) -> authserver_oauth::Result<ProviderToken> {
        assert_eq!(ctx.client_secret, "secret");
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_str(r#"{"access_token":"provider-access-token"}"#).unwrap())
    }

    async fn fetch(&self, _token: &ProviderToken) -> authserver_oauth::Result<String> {
        Ok(self.profile.clone())
    }

    fn normalize(&self, profile: &str) -> authserver_oauth::Result<NormalizedUser> {
        self.real.normalize(profile)
    }
}

/// Scripted registry answer
#[derive(Clone)]
pub enum Answer<T> {
    Found(T),
    NotFound,
    Remote(RemoteStatus),
    /// Never replies
    Hang,
    /// Transport failure
    Fail,
}

impl<T: Clone> Answer<T> {
    async fn reply(&self, subject: &str) -> authserver_registry::Result<Lookup<T>> {
        match self {
            Answer::Found(value) => Ok(Lookup::Found(value.clone())),
            Answer::NotFound => Ok(Lookup::NotFound {
                reason: Some("not found".to_string()),
            }),
            Answer::Remote(status) => Ok(Lookup::Remote(status.clone())),
            Answer::Hang => std::future::pending().await,
            Answer::Fail => Err(RegistryError::Transport {
                subject: subject.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

pub struct FakeRegistry {
    pub identity: Answer<Identity>,
    pub user_exists: Answer<()>,
    pub user: Answer<User>,
    pub active: bool,
    calls: Mutex<Vec<&'static str>>,
    queries: Mutex<Vec<IdentityQuery>>,
}

impl FakeRegistry {
    /// Registry that knows one identity linked to `user_id`
    pub fn linked(provider: &str, identifier: &str, user_id: UserId) -> Self {
        let mut attributes = serde_json::Map::new();
        attributes.insert("first_name".into(), "Ann".into());
        Self {
            identity: Answer::Found(Identity {
                id: 1,
                provider: provider.to_string(),
                identifier: identifier.to_string(),
                user_id,
            }),
            user_exists: Answer::Found(()),
            user: Answer::Found(User {
                id: user_id,
                attributes,
            }),
            active: true,
            calls: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_identity(mut self, answer: Answer<Identity>) -> Self {
        self.identity = answer;
        self
    }

    pub fn with_user_exists(mut self, answer: Answer<()>) -> Self {
        self.user_exists = answer;
        self
    }

    pub fn with_user(mut self, answer: Answer<User>) -> Self {
        self.user = answer;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<IdentityQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IdentityRegistry for FakeRegistry {
    async fn identity_exists(
        &self,
        query: &IdentityQuery,
        _timeout: Duration,
    ) -> authserver_registry::Result<Lookup<Identity>> {
        self.record("identity_exists");
        self.queries.lock().unwrap().push(query.clone());
        self.identity.reply("IdentityService.GetIdentity").await
    }

    async fn user_exists(
        &self,
        _id: UserId,
        _timeout: Duration,
    ) -> authserver_registry::Result<Lookup<()>> {
        self.record("user_exists");
        self.user_exists.reply("UserService.Exist").await
    }

    async fn user_fetch(
        &self,
        _id: UserId,
        _timeout: Duration,
    ) -> authserver_registry::Result<Lookup<User>> {
        self.record("user_fetch");
        self.user.reply("UserService.Get").await
    }

    async fn is_active(&self) -> bool {
        self.active
    }
}

pub struct TestApp {
    pub router: Router,
    pub registry: Arc<FakeRegistry>,
    pub exchanges: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(registry: FakeRegistry, providers: Vec<StubProvider>) -> Self {
        Self::with_timeout(registry, providers, Duration::from_secs(5))
    }

    pub fn with_timeout(
        registry: FakeRegistry,
        providers: Vec<StubProvider>,
        registry_timeout: Duration,
    ) -> Self {
        let exchanges = providers
            .first()
            .map(|p| Arc::clone(&p.exchanges))
            .unwrap_or_default();
        let set = providers
            .into_iter()
            .fold(ProviderSet::new(), |set, p| set.with(Arc::new(p)));
        let registry = Arc::new(registry);

        let state = AppState::from_parts(set, registry.clone(), ISSUER, &test_keys())
            .unwrap()
            .with_registry_timeout(registry_timeout);

        Self {
            router: create_router(Arc::new(state)),
            registry,
            exchanges,
        }
    }

    /// Google is the only configured provider
    pub fn google(registry: FakeRegistry) -> Self {
        Self::new(
            registry,
            vec![StubProvider::new(ProviderKind::Google, GOOGLE_PROFILE)],
        )
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First JSON-API error code
    pub fn error_code(&self) -> String {
        self.json()["errors"][0]["code"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

pub fn token_request(provider: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/tokens/{}", provider))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}
