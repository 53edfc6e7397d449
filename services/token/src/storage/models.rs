//! Key store record types.
//!
//! The private material is never included in `Debug` output.

use std::fmt;
use zeroize::Zeroizing;

/// A stored RSA signing key.
///
/// `id` is assigned by the store and never reused. `expires_at` is fixed at
/// insert time.
#[derive(Clone)]
pub struct SigningKey {
    /// Store-assigned identifier, published as the JWK `kid`.
    pub id: i64,
    /// Serialized private key exactly as stored; wiped on drop.
    material: Zeroizing<Vec<u8>>,
    /// Absolute expiry, Unix seconds.
    pub expires_at: i64,
}

impl SigningKey {
    pub fn new(id: i64, material: Vec<u8>, expires_at: i64) -> Self {
        Self {
            id,
            material: Zeroizing::new(material),
            expires_at,
        }
    }

    /// Raw private key material. Never log or transmit it.
    pub fn material(&self) -> &[u8] {
        &self.material
    }

    /// The `kid` string binding tokens to this key.
    pub fn kid(&self) -> String {
        self.id.to_string()
    }

    /// Active keys expire strictly after `now`.
    pub const fn is_active_at(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("id", &self.id)
            .field("material", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
