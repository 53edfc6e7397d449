//! Shared test utilities for jwks-issuer workspace crates.
//!
//! This crate provides:
//! - Proptest generators for domain types
//! - Test fixtures with sample key material

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use generators::*;
