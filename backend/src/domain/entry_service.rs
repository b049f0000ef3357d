//! Entry service domain logic for the wellness journal.
//!
//! Owns the journal's single source of truth: the in-memory entry
//! collection, loaded once from storage and written through on every
//! mutation. Enforces the one-entry-per-date invariant and keeps the
//! collection sorted newest-first at all times, so reads never need to
//! sort.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use log::info;

use crate::domain::commands::entries::{SaveEntryCommand, SaveEntryResult, UpdateEntryCommand};
use crate::domain::errors::JournalError;
use crate::domain::models::entry::JournalEntry;
use crate::storage::{meta_keys, Connection, EntryStorage, MetaStorage};

pub struct EntryService<C: Connection> {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
    repository: C::EntryRepository,
    meta_repository: C::MetaRepository,
}

impl<C: Connection> EntryService<C> {
    /// Create the service, loading the stored collection into memory.
    pub fn new(connection: Arc<C>) -> Result<Self, JournalError> {
        let repository = connection.create_entry_repository();
        let meta_repository = connection.create_meta_repository();

        let mut entries = repository.load_entries()?.unwrap_or_default();
        sort_newest_first(&mut entries);

        Ok(Self {
            entries: Arc::new(Mutex::new(entries)),
            repository,
            meta_repository,
        })
    }

    /// Save a new entry from the entry form.
    ///
    /// Validation happens before any mutation. If an entry already exists
    /// for the date and the command does not carry `overwrite`, nothing is
    /// changed and the conflict is returned for the caller to resolve.
    /// On confirmed replacement the existing entry keeps its id and
    /// creation timestamp.
    pub fn save_entry(&self, command: SaveEntryCommand) -> Result<SaveEntryResult, JournalError> {
        command.scores.validate()?;
        for dose in &command.peptides {
            dose.validate()?;
        }

        let mut entries = self.entries.lock().unwrap();
        let now = Utc::now();

        let entry = match entries.iter().position(|e| e.date == command.date) {
            Some(index) => {
                if !command.overwrite {
                    info!("Entry already exists for {}, reporting conflict", command.date);
                    return Ok(SaveEntryResult::Conflict { date: command.date });
                }

                let existing = &entries[index];
                let replacement = JournalEntry {
                    id: existing.id.clone(),
                    date: command.date,
                    scores: command.scores,
                    peptides: command.peptides,
                    notes: command.notes,
                    created_at: existing.created_at,
                    updated_at: now,
                };
                entries[index] = replacement.clone();
                info!("Replaced entry {} for {}", replacement.id, command.date);
                replacement
            }
            None => {
                let entry = JournalEntry {
                    id: shared::Entry::generate_id(now.timestamp_millis() as u64),
                    date: command.date,
                    scores: command.scores,
                    peptides: command.peptides,
                    notes: command.notes,
                    created_at: now,
                    updated_at: now,
                };
                entries.push(entry.clone());
                info!("Created entry {} for {}", entry.id, command.date);
                entry
            }
        };

        sort_newest_first(&mut entries);
        self.persist(&entries)?;

        Ok(SaveEntryResult::Saved(entry))
    }

    /// Edit an existing entry, replacing every field except id and
    /// creation timestamp.
    pub fn update_entry(&self, command: UpdateEntryCommand) -> Result<JournalEntry, JournalError> {
        command.scores.validate()?;
        for dose in &command.peptides {
            dose.validate()?;
        }

        let mut entries = self.entries.lock().unwrap();

        let index = entries
            .iter()
            .position(|e| e.id == command.id)
            .ok_or_else(|| JournalError::NotFound(command.id.clone()))?;

        // Moving the entry onto a date already held by a different entry
        // would break the uniqueness invariant.
        if entries
            .iter()
            .any(|e| e.date == command.date && e.id != command.id)
        {
            return Err(JournalError::Validation(format!(
                "another entry already exists for {}",
                command.date
            )));
        }

        let existing = &entries[index];
        let updated = JournalEntry {
            id: existing.id.clone(),
            date: command.date,
            scores: command.scores,
            peptides: command.peptides,
            notes: command.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        entries[index] = updated.clone();

        sort_newest_first(&mut entries);
        self.persist(&entries)?;

        info!("Updated entry {}", updated.id);
        Ok(updated)
    }

    /// Delete an entry by id. Not idempotent: a missing id is `NotFound`.
    pub fn delete_entry(&self, id: &str) -> Result<JournalEntry, JournalError> {
        let mut entries = self.entries.lock().unwrap();

        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;

        let removed = entries.remove(index);
        self.persist(&entries)?;

        info!("Deleted entry {} for {}", removed.id, removed.date);
        Ok(removed)
    }

    /// The full history, newest first.
    pub fn list_entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Option<JournalEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.date == date)
            .cloned()
    }

    pub fn get_entry(&self, id: &str) -> Result<JournalEntry, JournalError> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| JournalError::NotFound(id.to_string()))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Commit a restored collection wholesale. Used by the backup restore
    /// after its merge has been computed and validated.
    pub fn replace_all(&self, mut new_entries: Vec<JournalEntry>) -> Result<(), JournalError> {
        sort_newest_first(&mut new_entries);

        let mut entries = self.entries.lock().unwrap();
        *entries = new_entries;
        self.persist(&entries)
    }

    /// Write the collection through to storage and stamp the save time.
    /// On failure the in-memory collection stays authoritative; the error
    /// is surfaced so the UI can warn.
    fn persist(&self, entries: &[JournalEntry]) -> Result<(), JournalError> {
        self.repository.save_entries(entries)?;
        self.meta_repository
            .set_timestamp(meta_keys::LAST_SAVED, Utc::now())?;
        Ok(())
    }
}

fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}
