//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! The contract is a key-value blob store: each repository owns one logical
//! key and loads/saves its whole collection at once. A load distinguishes
//! "key absent" (`None`, first launch) from an empty collection.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::models::entry::JournalEntry;
use crate::domain::models::peptide::PeptideTemplate;

/// Well-known keys in the meta blob.
pub mod meta_keys {
    /// Timestamp of the last successful persistence write.
    pub const LAST_SAVED: &str = "last_saved";
    /// Timestamp of the last export taken by the user.
    pub const LAST_BACKUP: &str = "last_backup";
}

/// Interface for journal entry collection storage.
///
/// All operations are synchronous: there is exactly one logical writer (the
/// UI thread) and no background tasks.
pub trait EntryStorage: Send + Sync {
    /// Load the stored entry collection; `None` when nothing was ever saved.
    fn load_entries(&self) -> Result<Option<Vec<JournalEntry>>>;

    /// Persist the full entry collection, replacing the previous blob.
    fn save_entries(&self, entries: &[JournalEntry]) -> Result<()>;
}

/// Interface for peptide template registry storage.
///
/// Only templates are persisted; the per-session administered flags are
/// transient and rebuilt on load.
pub trait PeptideStorage: Send + Sync {
    /// Load the stored templates; `None` when nothing was ever saved.
    fn load_templates(&self) -> Result<Option<Vec<PeptideTemplate>>>;

    /// Persist the full template list, replacing the previous blob.
    fn save_templates(&self, templates: &[PeptideTemplate]) -> Result<()>;
}

/// Interface for housekeeping timestamps (last save, last backup).
pub trait MetaStorage: Send + Sync {
    fn get_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>>;

    fn set_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<()>;
}

/// Interface for storage connections.
///
/// Abstracts away the concrete backing (JSON files, an in-memory store for
/// tests, ...) and provides factory methods for creating repositories, so
/// the domain layer works with any storage backend without knowing the
/// implementation details.
pub trait Connection: Send + Sync + Clone {
    type EntryRepository: EntryStorage;
    type PeptideRepository: PeptideStorage;
    type MetaRepository: MetaStorage;

    fn create_entry_repository(&self) -> Self::EntryRepository;

    fn create_peptide_repository(&self) -> Self::PeptideRepository;

    fn create_meta_repository(&self) -> Self::MetaRepository;
}
