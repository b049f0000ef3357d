//! JSON-backed journal entry repository.

use anyhow::{Context, Result};

use crate::domain::models::entry::JournalEntry;
use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::EntryStorage;

const ENTRIES_BLOB: &str = "entries.json";

/// Stores the whole entry collection as one JSON blob.
#[derive(Clone)]
pub struct EntryRepository {
    connection: JsonConnection,
}

impl EntryRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl EntryStorage for EntryRepository {
    fn load_entries(&self) -> Result<Option<Vec<JournalEntry>>> {
        match self.connection.read_blob(ENTRIES_BLOB)? {
            Some(contents) => {
                let entries: Vec<JournalEntry> = serde_json::from_str(&contents)
                    .context("failed to parse stored entries")?;
                Ok(Some(entries))
            }
            None => Ok(None),
        }
    }

    fn save_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(entries).context("failed to serialize entries")?;
        self.connection.write_blob(ENTRIES_BLOB, &contents)
    }
}
