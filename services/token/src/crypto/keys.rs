//! RSA key generation and (de)serialization.
//!
//! Private keys are stored as unencrypted PKCS#8 PEM. The public key is never
//! stored separately: it is always recomputed from the private material.

use crate::error::IssuerError;
use jsonwebtoken::EncodingKey;
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey};
use zeroize::Zeroizing;

/// Modulus size for every generated signing key.
pub const KEY_BITS: usize = 2048;

/// Public exponent for every generated signing key.
pub const PUBLIC_EXPONENT: u32 = 65_537;

/// Freshly generated keypair, both halves PEM encoded.
pub struct GeneratedKeypair {
    /// PKCS#8 private key; wiped on drop.
    pub private_pem: Zeroizing<String>,
    /// SubjectPublicKeyInfo public key.
    pub public_pem: String,
}

impl std::fmt::Debug for GeneratedKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKeypair")
            .field("private_pem", &"<redacted>")
            .field("public_pem", &self.public_pem)
            .finish()
    }
}

/// RSA public modulus and exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicNumbers {
    /// Modulus `n`.
    pub modulus: BigUint,
    /// Public exponent `e`.
    pub exponent: BigUint,
}

/// Stateless codec over RSA key material.
pub struct KeyCodec;

impl KeyCodec {
    /// Generates a 2048-bit RSA keypair with exponent 65537 from the OS CSPRNG.
    ///
    /// CPU bound; async callers should run it on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::KeyGeneration`] if the primitive or the PEM
    /// encoding fails. Callers must not retry silently.
    pub fn generate_keypair() -> Result<GeneratedKeypair, IssuerError> {
        let exponent = BigUint::from(PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, KEY_BITS, &exponent)
            .map_err(|e| IssuerError::key_generation(e.to_string()))?;

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| IssuerError::key_generation(e.to_string()))?;
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| IssuerError::key_generation(e.to_string()))?;

        Ok(GeneratedKeypair {
            private_pem,
            public_pem,
        })
    }

    /// Deserializes stored private material.
    ///
    /// Accepts PKCS#8 PEM and, for keys written by older tooling, PKCS#1 PEM.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::KeyMaterialCorrupt`] if the bytes are not UTF-8
    /// or do not decode to an RSA private key.
    pub fn load_private(material: &[u8]) -> Result<RsaPrivateKey, IssuerError> {
        let pem = std::str::from_utf8(material)
            .map_err(|_| IssuerError::key_material("material is not valid UTF-8"))?;

        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|pkcs8_err| {
                RsaPrivateKey::from_pkcs1_pem(pem).map_err(|_| pkcs8_err)
            })
            .map_err(|e| IssuerError::key_material(e.to_string()))
    }

    /// Loads stored material into a key usable for RS256 signing.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::KeyMaterialCorrupt`] if the material does not
    /// load, or [`IssuerError::Signing`] if the key cannot be handed to the
    /// signer.
    pub fn encoding_key(material: &[u8]) -> Result<EncodingKey, IssuerError> {
        let private_key = Self::load_private(material)?;
        let der = private_key
            .to_pkcs1_der()
            .map_err(|e| IssuerError::signing(e.to_string()))?;
        Ok(EncodingKey::from_rsa_der(der.as_bytes()))
    }

    /// Derives the public modulus and exponent from private material.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::KeyMaterialCorrupt`] if the material does not load.
    pub fn public_numbers(material: &[u8]) -> Result<PublicNumbers, IssuerError> {
        let private_key = Self::load_private(material)?;
        Ok(PublicNumbers {
            modulus: private_key.n().clone(),
            exponent: private_key.e().clone(),
        })
    }
}
