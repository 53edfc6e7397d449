//! Key lifecycle: guarantees a usable key set at startup.
//!
//! On first run the store is seeded with one already-expired key (so callers
//! can exercise expired-token handling) and one key active for an hour.
//! There is no background rotation; restarts leave a populated store alone.

use crate::config::duration_secs as secs;
use crate::crypto::KeyCodec;
use crate::error::IssuerError;
use crate::metrics;
use crate::storage::KeyStore;
use std::time::Duration;
use tracing::info;

/// Expiry offsets applied to seed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPolicy {
    /// How far in the past the expired seed key expires.
    pub expired_backdate: Duration,
    /// How long the active seed key stays valid.
    pub active_ttl: Duration,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            expired_backdate: Duration::from_secs(10),
            active_ttl: Duration::from_secs(3600),
        }
    }
}

/// What [`KeyLifecycleManager::bootstrap`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Active keys were already present; nothing was written.
    AlreadySeeded {
        /// Number of active keys found.
        active_keys: usize,
    },
    /// The store was seeded with a fresh key pair.
    Seeded {
        /// Id of the key that is already expired.
        expired_kid: i64,
        /// Id of the key that is active.
        active_kid: i64,
    },
}

pub struct KeyLifecycleManager<S> {
    store: S,
    policy: SeedPolicy,
}

impl<S: KeyStore> KeyLifecycleManager<S> {
    pub const fn new(store: S, policy: SeedPolicy) -> Self {
        Self { store, policy }
    }

    /// Seeds the store unless it already holds an active key.
    ///
    /// Not atomic across processes: two instances racing on an empty shared
    /// store may both seed. Selection stays deterministic in that case.
    ///
    /// # Errors
    ///
    /// Fails on store errors or key generation failure; startup must abort.
    pub async fn bootstrap(&self, now: i64) -> Result<BootstrapOutcome, IssuerError> {
        let active = self.store.select_all_active(now).await?;
        if !active.is_empty() {
            info!(active_keys = active.len(), "Key store already seeded");
            return Ok(BootstrapOutcome::AlreadySeeded {
                active_keys: active.len(),
            });
        }

        let expired_kid = self
            .seed_key(now.saturating_sub(secs(self.policy.expired_backdate)))
            .await?;
        let active_kid = self
            .seed_key(now.saturating_add(secs(self.policy.active_ttl)))
            .await?;

        info!(expired_kid, active_kid, "Seeded key store");
        Ok(BootstrapOutcome::Seeded {
            expired_kid,
            active_kid,
        })
    }

    async fn seed_key(&self, expires_at: i64) -> Result<i64, IssuerError> {
        let keypair = tokio::task::spawn_blocking(KeyCodec::generate_keypair)
            .await
            .map_err(|e| IssuerError::key_generation(e.to_string()))??;
        metrics::record_key_generated();

        let kid = self
            .store
            .insert(keypair.private_pem.as_bytes(), expires_at)
            .await?;
        Ok(kid)
    }
}
