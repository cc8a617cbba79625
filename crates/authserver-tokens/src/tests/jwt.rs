//! Signing and verification tests.

use super::helpers::*;
use crate::*;
use jsonwebtoken::{decode_header, encode, Algorithm, EncodingKey, Header};
use std::io::Write;

#[test]
fn test_mint_and_verify() {
    let minted = test_minter().mint().unwrap();

    assert_eq!(minted.token.split('.').count(), 3);
    assert!(test_verifier().verify(&minted.token).is_ok());
}

#[test]
fn test_header_is_rs512() {
    let minted = test_minter().mint().unwrap();
    let header = decode_header(&minted.token).unwrap();
    assert_eq!(header.alg, Algorithm::RS512);
}

#[test]
fn test_tokens_differ_per_mint() {
    let minter = test_minter();
    let first = minter.mint().unwrap();
    let second = minter.mint().unwrap();

    assert_ne!(first.claims.jti, second.claims.jti);
    assert_ne!(first.token, second.token);
}

#[test]
fn test_mismatched_key_rejected() {
    let foreign = TokenMinter::new(ISSUER, &other_keys()).unwrap();
    let minted = foreign.mint().unwrap();

    let err = test_verifier().verify(&minted.token).unwrap_err();
    assert!(matches!(err, TokenError::Rejected(_)));
}

#[test]
fn test_tampered_signature_rejected() {
    let minted = test_minter().mint().unwrap();
    let tampered = tamper_signature(&minted.token);

    assert_ne!(tampered, minted.token);
    assert!(!test_verifier().is_valid(&tampered));
}

#[test]
fn test_expired_token_rejected() {
    let now = current_timestamp();
    let mut claims = StandardClaims::issue(ISSUER, now - 3_600, DEFAULT_TOKEN_TTL);
    claims.exp = now - 10;

    let token = test_minter().sign(&claims).unwrap();
    assert!(!test_verifier().is_valid(&token));
}

#[test]
fn test_not_yet_valid_token_rejected() {
    let now = current_timestamp();
    let claims = StandardClaims::issue(ISSUER, now + 3_600, DEFAULT_TOKEN_TTL);

    let token = test_minter().sign(&claims).unwrap();
    assert!(!test_verifier().is_valid(&token));
}

#[test]
fn test_wrong_issuer_rejected() {
    let minter = TokenMinter::new("someone-else", &test_keys()).unwrap();
    let minted = minter.mint().unwrap();

    assert!(!test_verifier().is_valid(&minted.token));
}

#[test]
fn test_wrong_audience_rejected() {
    let mut claims = test_minter().claims();
    claims.aud = "admin".to_string();

    let token = test_minter().sign(&claims).unwrap();
    assert!(!test_verifier().is_valid(&token));
}

#[test]
fn test_other_algorithm_rejected() {
    let claims = test_minter().claims();
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(b"shared-secret"),
    )
    .unwrap();

    assert!(!test_verifier().is_valid(&token));
}

#[test]
fn test_garbage_rejected() {
    let verifier = test_verifier();
    assert!(!verifier.is_valid(""));
    assert!(!verifier.is_valid("not-a-token"));
    assert!(!verifier.is_valid("a.b.c"));
}

#[test]
fn test_load_keys_from_files() {
    let mut private = tempfile::NamedTempFile::new().unwrap();
    private.write_all(PRIVATE_PEM).unwrap();
    let mut public = tempfile::NamedTempFile::new().unwrap();
    public.write_all(PUBLIC_PEM).unwrap();

    let keys = RsaKeyPair::load(private.path(), public.path()).unwrap();
    let minted = TokenMinter::new(ISSUER, &keys).unwrap().mint().unwrap();
    assert!(test_verifier().is_valid(&minted.token));
}

#[test]
fn test_missing_key_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pem");

    let err = RsaKeyPair::load(&missing, &missing).unwrap_err();
    assert!(matches!(err, TokenError::KeyFile { .. }));
}

#[test]
fn test_invalid_pem_rejected() {
    let err = RsaKeyPair::from_pem(b"not a key", PUBLIC_PEM).unwrap_err();
    assert!(matches!(err, TokenError::InvalidKey(_)));
}
