//! Shared library for cross-cutting concerns in jwks-issuer workspace crates.
//!
//! This crate provides centralized implementations for:
//! - A startup error type
//! - Environment-driven configuration parsing
//! - Tracing subscriber initialisation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod tracing_config;

pub use env::parse_value;
pub use error::PlatformError;
pub use tracing_config::{init_tracing, TracingConfig};
