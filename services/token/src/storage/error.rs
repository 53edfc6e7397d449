use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error preparing database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key store connection lock poisoned")]
    LockPoisoned,

    #[error("Blocking store task failed: {0}")]
    Task(String),
}
