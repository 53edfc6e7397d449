//! Durable key storage.
//!
//! Append-only: records are inserted and read, never updated or deleted.

mod error;
pub mod models;
pub mod sqlite;

use std::future::Future;

pub use error::StoreError;
pub use models::SigningKey;
pub use sqlite::SqliteKeyStore;

/// Storage operations the issuer needs from a backing engine.
///
/// Implementations must tolerate concurrent callers; every operation is a
/// single statement.
pub trait KeyStore: Send + Sync {
    /// Idempotently create the backing table.
    fn init(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Append a key and return its newly assigned, strictly increasing id.
    fn insert(
        &self,
        material: &[u8],
        expires_at: i64,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Pick one key by freshness policy.
    ///
    /// Expired (`expires_at <= now`): latest expiry, then highest id.
    /// Active (`expires_at > now`): earliest expiry, then lowest id.
    fn select_one(
        &self,
        want_expired: bool,
        now: i64,
    ) -> impl Future<Output = Result<Option<SigningKey>, StoreError>> + Send;

    /// All keys with `expires_at > now`, ascending by expiry then id.
    fn select_all_active(
        &self,
        now: i64,
    ) -> impl Future<Output = Result<Vec<SigningKey>, StoreError>> + Send;

    /// Total number of stored keys.
    fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
