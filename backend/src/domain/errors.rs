//! Typed errors surfaced by the domain services.

use thiserror::Error;

/// Error kinds a domain operation can fail with.
///
/// Validation and lookup failures are detected before any mutation, so a
/// returned error always means no state change happened. The one exception
/// is `Storage`, where the in-memory collection has already been updated
/// and remains the source of truth until the next successful save.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("registry index {index} out of range (registry has {len} peptides)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid backup format: {0}")]
    InvalidFormat(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
