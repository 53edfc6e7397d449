//! JWKS document built from the active keys in the store.
//!
//! Nothing is cached: every call reflects the store at `now`, so a key
//! inserted or expiring between two calls shows up (or drops out) on the
//! next one.

use crate::crypto::{encode_biguint_base64url, KeyCodec};
use crate::error::IssuerError;
use crate::jwt::serializer::ALGORITHM_NAME;
use crate::metrics;
use crate::storage::{KeyStore, SigningKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Public RSA signing key as published in the key set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub alg: String,
    pub kid: String,
    pub n: String,
    pub e: String,
}

impl Jwk {
    /// RS256 signing key with base64url-encoded modulus and exponent.
    pub fn rsa(kid: impl Into<String>, n: String, e: String) -> Self {
        Self {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: ALGORITHM_NAME.to_string(),
            kid: kid.into(),
            n,
            e,
        }
    }

    /// Derives the published form of a stored key.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::KeyMaterialCorrupt`] if the material does not load.
    pub fn from_signing_key(key: &SigningKey) -> Result<Self, IssuerError> {
        let numbers = KeyCodec::public_numbers(key.material())?;
        Ok(Self::rsa(
            key.kid(),
            encode_biguint_base64url(&numbers.modulus),
            encode_biguint_base64url(&numbers.exponent),
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    #[must_use]
    pub const fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    #[must_use]
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub struct JwksPublisher<S> {
    store: S,
}

impl<S: KeyStore> JwksPublisher<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the key set of every key active at `now`, soonest expiry first.
    ///
    /// # Errors
    ///
    /// Fails on store errors, or with [`IssuerError::KeyMaterialCorrupt`] if
    /// any active record does not load. No partial document is returned.
    pub async fn publish_active_keys(&self, now: i64) -> Result<Jwks, IssuerError> {
        let active = self.store.select_all_active(now).await?;

        let keys = active
            .iter()
            .map(|key| {
                Jwk::from_signing_key(key).inspect_err(|e| {
                    error!(kid = key.id, error = %e, "Active key failed to load");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        metrics::set_published_keys(keys.len());
        debug!(keys = keys.len(), "Published key set");
        Ok(Jwks::new(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteKeyStore;
    use test_utils::fixtures::{shared_private_key, shared_private_pem, CORRUPT_PEM};
    use test_utils::generators::FIXED_NOW;

    const NOW: i64 = FIXED_NOW;

    async fn publisher() -> (SqliteKeyStore, JwksPublisher<SqliteKeyStore>) {
        let store = SqliteKeyStore::open_in_memory().unwrap();
        store.init().await.unwrap();
        (store.clone(), JwksPublisher::new(store))
    }

    #[test]
    fn test_jwk_serializes_exact_members() {
        let jwk = Jwk::rsa("3", "bW9k".to_string(), "AQAB".to_string());
        let value = serde_json::to_value(&jwk).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": "3",
                "n": "bW9k",
                "e": "AQAB",
            })
        );
    }

    #[tokio::test]
    async fn test_publishes_only_active_keys() {
        let (store, publisher) = publisher().await;
        store
            .insert(shared_private_pem().as_bytes(), NOW - 10)
            .await
            .unwrap();
        let active = store
            .insert(shared_private_pem().as_bytes(), NOW + 3600)
            .await
            .unwrap();

        let jwks = publisher.publish_active_keys(NOW).await.unwrap();
        assert_eq!(jwks.keys.len(), 1);

        let jwk = &jwks.keys[0];
        assert_eq!(jwk.kid, active.to_string());
        assert_eq!(jwk.e, "AQAB");
        assert_eq!(
            jwk.n,
            encode_biguint_base64url(rsa::traits::PublicKeyParts::n(shared_private_key()))
        );
        assert!(!jwk.n.contains('='));
    }

    #[tokio::test]
    async fn test_inserted_key_appears_until_it_expires() {
        let (store, publisher) = publisher().await;
        store
            .insert(shared_private_pem().as_bytes(), NOW + 3600)
            .await
            .unwrap();
        let before = publisher.publish_active_keys(NOW).await.unwrap().keys.len();

        let kid = store
            .insert(shared_private_pem().as_bytes(), NOW + 60)
            .await
            .unwrap()
            .to_string();
        let jwks = publisher.publish_active_keys(NOW).await.unwrap();
        assert_eq!(jwks.keys.len(), before + 1);
        assert!(jwks.find_key(&kid).is_some());

        let jwks = publisher.publish_active_keys(NOW + 60).await.unwrap();
        assert!(jwks.find_key(&kid).is_none());
        assert_eq!(jwks.keys.len(), before);
    }

    #[tokio::test]
    async fn test_empty_store_publishes_empty_set() {
        let (_store, publisher) = publisher().await;
        let jwks = publisher.publish_active_keys(NOW).await.unwrap();

        assert!(jwks.is_empty());
        assert_eq!(serde_json::to_string(&jwks).unwrap(), r#"{"keys":[]}"#);
    }

    #[tokio::test]
    async fn test_corrupt_record_fails_whole_document() {
        let (store, publisher) = publisher().await;
        store
            .insert(shared_private_pem().as_bytes(), NOW + 60)
            .await
            .unwrap();
        store.insert(CORRUPT_PEM, NOW + 120).await.unwrap();

        let err = publisher.publish_active_keys(NOW).await.unwrap_err();
        assert!(matches!(err, IssuerError::KeyMaterialCorrupt(_)));
    }

    #[test]
    fn test_find_key() {
        let jwks = Jwks::new(vec![
            Jwk::rsa("1", "a".to_string(), "AQAB".to_string()),
            Jwk::rsa("2", "b".to_string(), "AQAB".to_string()),
        ]);
        assert_eq!(jwks.find_key("2").map(|k| k.n.as_str()), Some("b"));
        assert!(jwks.find_key("3").is_none());
    }
}
