//! RS512 login tokens: claims, key material, minting and verification.

pub mod claims;
pub mod errors;
pub mod keys;
mod minter;
mod verifier;

#[cfg(test)]
mod tests;

pub use claims::{current_timestamp, StandardClaims, AUDIENCE, DEFAULT_TOKEN_TTL};
pub use errors::{Result, TokenError};
pub use keys::RsaKeyPair;
pub use minter::{MintedToken, TokenMinter};
pub use verifier::TokenVerifier;
