use std::time::Duration;
use thiserror::Error;

/// Failures that prevented an authoritative registry answer
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("cannot connect to messaging server {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("no reply on {subject} within {timeout:?}")]
    Timeout { subject: String, timeout: Duration },

    #[error("transport error on {subject}: {reason}")]
    Transport { subject: String, reason: String },

    #[error("malformed reply on {subject}: {reason}")]
    Decode { subject: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
