//! Token validation, the gateway authorize hook and health checks.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};

use authserver_tokens::TokenMinter;
use common::*;

fn get_validate(auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/tokens/validate");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

fn authorize(headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/authorize");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

fn app() -> TestApp {
    TestApp::google(FakeRegistry::linked("google", "ann@example.com", 7))
}

#[tokio::test]
async fn test_valid_token() {
    let token = test_minter().mint().unwrap().token;

    let res = app()
        .send(get_validate(Some(&format!("Bearer {}", token))))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "jwt is valid");
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let res = app().send(get_validate(None)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.header("www-authenticate").unwrap().starts_with("Bearer"));
    assert_eq!(res.error_code(), "authentication");
}

#[tokio::test]
async fn test_foreign_issuer_is_unauthorized() {
    let token = TokenMinter::new("someone-else", &test_keys())
        .unwrap()
        .mint()
        .unwrap()
        .token;

    let res = app()
        .send(get_validate(Some(&format!("Bearer {}", token))))
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let res = app().send(get_validate(Some("Bearer not.a.jwt"))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorize_requires_https() {
    let res = app()
        .send(authorize(&[("X-Scheme", "http"), ("X-Original-Method", "POST")]))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "scheme is http not https");
}

#[tokio::test]
async fn test_authorize_passes_safe_methods() {
    for method in ["GET", "OPTIONS"] {
        let res = app()
            .send(authorize(&[("X-Scheme", "https"), ("X-Original-Method", method)]))
            .await;

        assert_eq!(res.status, StatusCode::OK);
        assert!(res.text().contains(method));
    }
}

#[tokio::test]
async fn test_authorize_skips_token_routes() {
    let res = app()
        .send(authorize(&[
            ("X-Scheme", "https"),
            ("X-Original-Method", "POST"),
            ("X-Original-Uri", "/tokens/google"),
        ]))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "no validation for /tokens");
}

#[tokio::test]
async fn test_authorize_checks_bearer_elsewhere() {
    let base = [
        ("X-Scheme", "https"),
        ("X-Original-Method", "DELETE"),
        ("X-Original-Uri", "/users/7"),
    ];

    let res = app().send(authorize(&base)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let bearer = format!("Bearer {}", test_minter().mint().unwrap().token);
    let mut headers = base.to_vec();
    headers.push(("Authorization", bearer.as_str()));
    let res = app().send(authorize(&headers)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "jwt is valid");
}

#[tokio::test]
async fn test_healthz() {
    let req = || Request::builder().uri("/healthz").body(Body::empty()).unwrap();

    let res = app().send(req()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "okay");

    let down = TestApp::google(
        FakeRegistry::linked("google", "ann@example.com", 7).with_active(false),
    );
    let res = down.send(req()).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let req = Request::builder()
        .uri("/healthz")
        .header("X-Request-ID", "req-123")
        .body(Body::empty())
        .unwrap();
    let res = app().send(req).await;
    assert_eq!(res.header("x-request-id"), Some("req-123"));

    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let res = app().send(req).await;
    assert!(!res.header("x-request-id").unwrap().is_empty());
}
