//! Key material codec.
//!
//! Generates RSA signing keypairs, loads stored private keys for signing and
//! derives the public numbers published in the JWKS document.

pub mod encoding;
pub mod keys;

// Re-exports
pub use encoding::{encode_base64url, encode_biguint_base64url, encode_unsigned_be};
pub use keys::{GeneratedKeypair, KeyCodec, PublicNumbers};
