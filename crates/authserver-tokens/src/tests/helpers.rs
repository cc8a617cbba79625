//! Shared fixtures for token tests.

use crate::*;

pub const ISSUER: &str = "dictyBase";

pub const PRIVATE_PEM: &[u8] = include_bytes!("../../testdata/private.pem");
pub const PUBLIC_PEM: &[u8] = include_bytes!("../../testdata/public.pem");
pub const OTHER_PRIVATE_PEM: &[u8] = include_bytes!("../../testdata/other_private.pem");
pub const OTHER_PUBLIC_PEM: &[u8] = include_bytes!("../../testdata/other_public.pem");

pub fn test_keys() -> RsaKeyPair {
    RsaKeyPair::from_pem(PRIVATE_PEM, PUBLIC_PEM).unwrap()
}

pub fn other_keys() -> RsaKeyPair {
    RsaKeyPair::from_pem(OTHER_PRIVATE_PEM, OTHER_PUBLIC_PEM).unwrap()
}

pub fn test_minter() -> TokenMinter {
    TokenMinter::new(ISSUER, &test_keys()).unwrap()
}

pub fn test_verifier() -> TokenVerifier {
    TokenVerifier::new(ISSUER, &test_keys()).unwrap()
}

/// Flip one character in the middle of the signature segment
pub fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut chars: Vec<char> = signature.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", head, chars.into_iter().collect::<String>())
}
