use thiserror::Error;

/// Failure at the durable storage layer.
///
/// A missing record is not an error anywhere in this crate: lookups return
/// `Option` and deleting an absent id succeeds.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum LeafletError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeafletError>;
