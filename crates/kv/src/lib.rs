//! Key-value blob store
//!
//! String keys map to JSON-encoded string payloads. Every write replaces the
//! whole value for its key, so callers never observe a half-written blob.

mod storage;

pub use storage::{FileBackedStorage, InMemoryStorage, Storage};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KvError>;
