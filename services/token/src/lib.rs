//! JWKS issuer library.
//!
//! Keeps RSA signing keys in SQLite, seeds an expired/active key pair on
//! first start, issues RS256 tokens whose `kid` names the signing key, and
//! publishes the active public keys as a JWKS document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod http;
pub mod jwks;
pub mod jwt;
pub mod lifecycle;
pub mod metrics;
pub mod shutdown;
pub mod storage;

// Re-exports for convenience
pub use config::Config;
pub use error::IssuerError;
pub use jwks::{Jwk, Jwks, JwksPublisher};
pub use jwt::{IssuedToken, TokenIssuer};
pub use lifecycle::{BootstrapOutcome, KeyLifecycleManager};
pub use storage::{KeyStore, SqliteKeyStore};
