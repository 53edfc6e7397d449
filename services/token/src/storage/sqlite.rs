//! SQLite-backed key store.
//!
//! One connection behind a mutex; each operation runs a single statement on
//! the blocking pool so async request handlers never stall on disk I/O.

use super::{KeyStore, SigningKey, StoreError};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS keys (
        kid     INTEGER PRIMARY KEY AUTOINCREMENT,
        key     BLOB NOT NULL,
        exp     INTEGER NOT NULL
    );
";

const SELECT_EXPIRED: &str =
    "SELECT kid, key, exp FROM keys WHERE exp <= ?1 ORDER BY exp DESC, kid DESC LIMIT 1";

const SELECT_ACTIVE: &str =
    "SELECT kid, key, exp FROM keys WHERE exp > ?1 ORDER BY exp ASC, kid ASC LIMIT 1";

const SELECT_ALL_ACTIVE: &str =
    "SELECT kid, key, exp FROM keys WHERE exp > ?1 ORDER BY exp ASC, kid ASC";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Cloneable handle to the SQLite key table.
#[derive(Clone)]
pub struct SqliteKeyStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        info!(path = %path.display(), "Opened key store");
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database. Contents vanish with the handle.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run one operation against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            op(&guard).map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Parse a `(kid, key, exp)` row.
    ///
    /// Rows written by other tooling may hold the PEM as TEXT rather than
    /// BLOB; both are accepted as raw bytes.
    fn row_to_key(row: &Row<'_>) -> rusqlite::Result<SigningKey> {
        let id: i64 = row.get(0)?;
        let material = match row.get_ref(1)? {
            ValueRef::Blob(bytes) | ValueRef::Text(bytes) => bytes.to_vec(),
            other => {
                return Err(rusqlite::Error::InvalidColumnType(
                    1,
                    "key".to_string(),
                    other.data_type(),
                ));
            }
        };
        let expires_at: i64 = row.get(2)?;
        Ok(SigningKey::new(id, material, expires_at))
    }
}

impl KeyStore for SqliteKeyStore {
    async fn init(&self) -> Result<(), StoreError> {
        self.run(|conn| conn.execute_batch(SCHEMA)).await?;
        debug!("Key store schema ensured");
        Ok(())
    }

    async fn insert(&self, material: &[u8], expires_at: i64) -> Result<i64, StoreError> {
        let material = material.to_vec();
        let id = self
            .run(move |conn| {
                conn.execute(
                    "INSERT INTO keys (key, exp) VALUES (?1, ?2)",
                    params![material, expires_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(kid = id, expires_at, "Inserted signing key");
        Ok(id)
    }

    async fn select_one(
        &self,
        want_expired: bool,
        now: i64,
    ) -> Result<Option<SigningKey>, StoreError> {
        let sql = if want_expired {
            SELECT_EXPIRED
        } else {
            SELECT_ACTIVE
        };
        self.run(move |conn| {
            conn.query_row(sql, params![now], Self::row_to_key)
                .optional()
        })
        .await
    }

    async fn select_all_active(&self, now: i64) -> Result<Vec<SigningKey>, StoreError> {
        self.run(move |conn| {
            let mut stmt = conn.prepare_cached(SELECT_ALL_ACTIVE)?;
            let rows = stmt.query_map(params![now], Self::row_to_key)?;
            rows.collect()
        })
        .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .run(|conn| conn.query_row("SELECT COUNT(*) FROM keys", [], |row| row.get(0)))
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
