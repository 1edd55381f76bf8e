//! Error types for SlabDB.

use thiserror::Error;

/// Result type alias using SlabError.
pub type Result<T> = std::result::Result<T, SlabError>;

/// Errors that can occur in SlabDB operations.
#[derive(Debug, Error)]
pub enum SlabError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Record errors
    #[error("record value exceeds size: {len} bytes (max {max})")]
    RecordExceedsSize { len: usize, max: u32 },

    #[error("record not found: probe stopped at slot {slot} after {iters} iterations")]
    RecordNotFound { slot: u64, iters: u8 },

    #[error("key size is incorrect: key does not fit in {key_size} bytes")]
    IncorrectKeySize { key_size: u32 },

    // Backing file errors
    #[error("wrong size: expected {expected} bytes, found {actual}")]
    Corrupted { expected: u64, actual: u64 },

    #[error("already initialized")]
    AlreadyInitialized,

    // Configuration errors
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    // Internal errors
    #[error("internal record error: {0}")]
    Internal(String),
}
