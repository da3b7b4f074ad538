//! ARA HTTP module providing the typed backend client
//!
//! The wire types are always available; the reqwest-backed client sits
//! behind the `client` feature (enabled by default).

pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{AraClient, AraClientBuilder, error::ClientError};
