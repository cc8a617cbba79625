//! Identity registry client.
//!
//! The token pipeline never talks to the registry directly; it goes through
//! the [`IdentityRegistry`] trait so the transport can be swapped. Every call
//! takes an explicit deadline and answers with a three-way [`Lookup`] so that
//! "not registered" and "registry reported an error" stay distinguishable
//! from transport failures ([`RegistryError`]).

pub mod errors;
pub mod http;
pub mod nats;
pub mod traits;
pub mod types;

pub use errors::{RegistryError, Result};
pub use http::HttpRegistry;
pub use nats::NatsRegistry;
pub use traits::IdentityRegistry;
pub use types::*;
