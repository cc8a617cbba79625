use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RSA key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("JWT signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
}

pub type Result<T> = std::result::Result<T, TokenError>;
