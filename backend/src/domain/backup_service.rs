//! Backup service domain logic: export, restore, and the deduplicating
//! merge that reconciles a backup's entries with the current journal.
//!
//! Restore is deliberately more conservative than the entry form: the form
//! may replace an existing date after explicit confirmation, but a restore
//! never overwrites. Entries whose date already exists are skipped and
//! counted, nothing more.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::domain::commands::backup::{
    ExportDataResult, ExportToPathResult, ImportDataResult, MergeResult,
};
use crate::domain::entry_service::EntryService;
use crate::domain::errors::JournalError;
use crate::domain::models::entry::JournalEntry;
use crate::domain::models::peptide::PeptideTemplate;
use crate::domain::peptide_service::PeptideService;
use crate::storage::{meta_keys, Connection, MetaStorage};

pub const BACKUP_VERSION: u32 = 1;

/// The backup interchange file. Round-trips exactly: an export imported
/// into an empty journal reproduces the original entry set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    #[serde(default = "default_backup_version")]
    pub version: u32,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub saved_peptides: Option<Vec<PeptideTemplate>>,
}

fn default_backup_version() -> u32 {
    BACKUP_VERSION
}

/// Deduplicating union of the current and incoming entry sets.
///
/// Pure function: dates already present are skipped (counted as
/// duplicates, never overwritten or mutated) and the result is re-sorted
/// newest-first. Committing and persisting the result is the caller's job.
pub fn merge_entries(current: &[JournalEntry], incoming: Vec<JournalEntry>) -> MergeResult {
    let mut seen_dates: HashSet<_> = current.iter().map(|e| e.date).collect();
    let mut merged = current.to_vec();
    let mut added_count = 0;

    for entry in incoming {
        // Inserting into the set also guards against duplicate dates
        // within the incoming list itself.
        if seen_dates.insert(entry.date) {
            merged.push(entry);
            added_count += 1;
        }
    }

    merged.sort_by(|a, b| b.date.cmp(&a.date));

    MergeResult {
        merged,
        added_count,
    }
}

/// Backup service that handles export/restore orchestration plus the
/// backup-reminder bookkeeping.
pub struct BackupService<C: Connection> {
    meta_repository: C::MetaRepository,
}

impl<C: Connection> BackupService<C> {
    pub fn new(connection: std::sync::Arc<C>) -> Self {
        Self {
            meta_repository: connection.create_meta_repository(),
        }
    }

    /// Serialize the full journal for export, independent of any active
    /// analytics window, and stamp the last-backup time.
    pub fn export_data(
        &self,
        entry_service: &EntryService<C>,
        peptide_service: &PeptideService<C>,
    ) -> Result<ExportDataResult, JournalError> {
        let entries = entry_service.list_entries();
        let entry_count = entries.len();

        let backup = BackupFile {
            version: BACKUP_VERSION,
            export_date: Some(Utc::now()),
            entries,
            saved_peptides: Some(peptide_service.templates()),
        };

        let json_content = serde_json::to_string_pretty(&backup)
            .map_err(|e| JournalError::Storage(anyhow!("failed to serialize backup: {}", e)))?;

        let filename = format!(
            "wellness-journal-backup-{}.json",
            Utc::now().format("%Y-%m-%d")
        );

        self.meta_repository
            .set_timestamp(meta_keys::LAST_BACKUP, Utc::now())?;

        info!("Exported {} entries as {}", entry_count, filename);

        Ok(ExportDataResult {
            json_content,
            filename,
            entry_count,
        })
    }

    /// Export straight to disk: a sanitized custom directory, or the
    /// Documents folder (falling back to home) when none is given.
    pub fn export_to_path(
        &self,
        custom_path: Option<String>,
        entry_service: &EntryService<C>,
        peptide_service: &PeptideService<C>,
    ) -> Result<ExportToPathResult, JournalError> {
        let export = self.export_data(entry_service, peptide_service)?;

        let export_dir = match custom_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(sanitize_path(&path)),
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("Could not determine default export directory");
                    return Ok(ExportToPathResult {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        entry_count: 0,
                    });
                }
            },
        };

        let file_path = export_dir.join(&export.filename);

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!(
                "Failed to create export directory {}: {}",
                export_dir.display(),
                e
            );
            return Ok(ExportToPathResult {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                entry_count: 0,
            });
        }

        match fs::write(&file_path, &export.json_content) {
            Ok(_) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!(
                    "Exported {} entries to {}",
                    export.entry_count, file_path
                );
                Ok(ExportToPathResult {
                    success: true,
                    message: format!("Backup exported to: {}", file_path),
                    file_path,
                    entry_count: export.entry_count,
                })
            }
            Err(e) => {
                error!("Failed to write export file {}: {}", file_path.display(), e);
                Ok(ExportToPathResult {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    entry_count: 0,
                })
            }
        }
    }

    /// Restore from a backup payload.
    ///
    /// Structural validation happens before any state change: a payload
    /// whose `entries` is missing or not a sequence is rejected wholesale
    /// with `InvalidFormat` and the journal is left untouched. The merge is
    /// computed into a new collection and only then committed.
    pub fn import_data(
        &self,
        json_content: &str,
        entry_service: &EntryService<C>,
        peptide_service: &PeptideService<C>,
    ) -> Result<ImportDataResult, JournalError> {
        let backup = parse_backup(json_content)?;

        let current = entry_service.list_entries();
        let incoming_count = backup.entries.len();

        let MergeResult {
            merged,
            added_count,
        } = merge_entries(&current, backup.entries);
        let skipped_count = incoming_count - added_count;
        let entry_count = merged.len();

        entry_service.replace_all(merged)?;

        if let Some(templates) = backup.saved_peptides {
            peptide_service.replace_templates(templates)?;
        }

        info!(
            "Import complete: {} added, {} duplicates skipped",
            added_count, skipped_count
        );

        Ok(ImportDataResult {
            added_count,
            skipped_count,
            entry_count,
        })
    }

    /// Reminder text for the UI toast, when a backup is due: either the
    /// user has never exported and has a week of entries, or the last
    /// export is two weeks old.
    pub fn check_backup_reminder(
        &self,
        entry_count: usize,
    ) -> Result<Option<String>, JournalError> {
        let last_backup = self
            .meta_repository
            .get_timestamp(meta_keys::LAST_BACKUP)?;

        let reminder = match last_backup {
            None if entry_count >= 7 => {
                Some("Tip: Export your data to keep a backup!".to_string())
            }
            Some(last) => {
                let days_since = (Utc::now() - last).num_days();
                if days_since >= 14 && entry_count > 0 {
                    Some("Reminder: Back up your data!".to_string())
                } else {
                    None
                }
            }
            None => None,
        };

        Ok(reminder)
    }
}

fn parse_backup(json_content: &str) -> Result<BackupFile, JournalError> {
    let value: serde_json::Value = serde_json::from_str(json_content)
        .map_err(|e| JournalError::InvalidFormat(format!("not valid JSON: {}", e)))?;

    match value.get("entries") {
        Some(entries) if entries.is_array() => {}
        Some(_) => {
            return Err(JournalError::InvalidFormat(
                "entries must be a sequence".to_string(),
            ))
        }
        None => {
            return Err(JournalError::InvalidFormat(
                "missing entries".to_string(),
            ))
        }
    }

    serde_json::from_value(value)
        .map_err(|e| JournalError::InvalidFormat(format!("malformed backup: {}", e)))
}

/// Basic path sanitization to handle common user input issues.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    // Remove surrounding quotes (single or double)
    if (cleaned.starts_with('"') && cleaned.ends_with('"'))
        || (cleaned.starts_with('\'') && cleaned.ends_with('\''))
    {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    cleaned = cleaned.trim().to_string();

    // Handle escaped spaces (common on some systems)
    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.ends_with('/') || cleaned.ends_with('\\') {
        cleaned.pop();
    }

    // Tilde expansion for home directory
    if cleaned.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::commands::entries::{SaveEntryCommand, SaveEntryResult};
    use crate::domain::models::entry::{AdministeredDose, DoseUnit, ScoreSet};
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::json::JsonConnection;

    struct Services {
        entries: EntryService<JsonConnection>,
        peptides: PeptideService<JsonConnection>,
        backup: BackupService<JsonConnection>,
    }

    fn services(env: &TestEnvironment) -> Services {
        let connection = Arc::new(env.connection.clone());
        Services {
            entries: EntryService::new(connection.clone()).unwrap(),
            peptides: PeptideService::new(connection.clone()).unwrap(),
            backup: BackupService::new(connection),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_entry(date_str: &str, wellness: u8) -> JournalEntry {
        JournalEntry {
            id: shared::Entry::generate_id(1702516122000 + u64::from(wellness)),
            date: date(date_str),
            scores: ScoreSet {
                wellness,
                energy: 6,
                pain: 4,
                sleep: 7,
                mobility: 6,
            },
            peptides: vec![AdministeredDose {
                name: "BPC-157".to_string(),
                dosage: 250.0,
                unit: DoseUnit::Mcg,
                site: Some("Abdomen".to_string()),
            }],
            notes: Some("felt good".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn save(services: &Services, date_str: &str, wellness: u8) {
        let result = services
            .entries
            .save_entry(SaveEntryCommand {
                date: date(date_str),
                scores: ScoreSet {
                    wellness,
                    energy: 6,
                    pain: 4,
                    sleep: 7,
                    mobility: 6,
                },
                notes: None,
                peptides: vec![],
                overwrite: false,
            })
            .unwrap();
        assert!(matches!(result, SaveEntryResult::Saved(_)));
    }

    #[test]
    fn test_merge_skips_existing_dates() {
        let current = vec![sample_entry("2024-01-01", 5)];
        let incoming = vec![sample_entry("2024-01-01", 9), sample_entry("2024-01-02", 7)];

        let result = merge_entries(&current, incoming);

        assert_eq!(result.added_count, 1);
        assert_eq!(result.merged.len(), 2);

        // The existing 2024-01-01 entry is untouched by the conflicting
        // incoming one.
        let kept = result
            .merged
            .iter()
            .find(|e| e.date == date("2024-01-01"))
            .unwrap();
        assert_eq!(kept.scores.wellness, 5);
    }

    #[test]
    fn test_merge_result_sorted_newest_first() {
        let current = vec![sample_entry("2024-01-05", 5)];
        let incoming = vec![sample_entry("2024-01-10", 6), sample_entry("2024-01-01", 4)];

        let result = merge_entries(&current, incoming);
        let dates: Vec<NaiveDate> = result.merged.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-10"), date("2024-01-05"), date("2024-01-01")]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let current = vec![sample_entry("2024-01-01", 5)];
        let incoming = vec![sample_entry("2024-01-02", 7)];

        let first = merge_entries(&current, incoming.clone());
        assert_eq!(first.added_count, 1);

        // Merging the same incoming set again adds nothing.
        let second = merge_entries(&first.merged, incoming);
        assert_eq!(second.added_count, 0);
        assert_eq!(second.merged.len(), first.merged.len());
    }

    #[test]
    fn test_export_then_import_round_trips_exactly() {
        let env = TestEnvironment::new().unwrap();
        let source = services(&env);

        source.peptides.toggle_administered(0).unwrap();
        let doses = source.peptides.snapshot_administered();
        source
            .entries
            .save_entry(SaveEntryCommand {
                date: date("2024-01-15"),
                scores: ScoreSet {
                    wellness: 7,
                    energy: 6,
                    pain: 3,
                    sleep: 8,
                    mobility: 7,
                },
                notes: Some("round trip me".to_string()),
                peptides: doses,
                overwrite: false,
            })
            .unwrap();
        save(&source, "2024-01-10", 4);

        let export = source
            .backup
            .export_data(&source.entries, &source.peptides)
            .unwrap();
        assert_eq!(export.entry_count, 2);
        assert!(export.filename.starts_with("wellness-journal-backup-"));
        assert!(export.filename.ends_with(".json"));

        // Restore into a fresh, empty journal.
        let target_env = TestEnvironment::new().unwrap();
        let target = services(&target_env);
        let result = target
            .backup
            .import_data(&export.json_content, &target.entries, &target.peptides)
            .unwrap();

        assert_eq!(result.added_count, 2);
        assert_eq!(result.skipped_count, 0);

        // Same ids, scores, doses, notes and timestamps.
        assert_eq!(target.entries.list_entries(), source.entries.list_entries());
        assert_eq!(target.peptides.templates(), source.peptides.templates());
    }

    #[test]
    fn test_import_duplicate_date_leaves_original_unchanged() {
        let env = TestEnvironment::new().unwrap();
        let services = services(&env);
        save(&services, "2024-01-01", 5);
        let original = services.entries.find_by_date(date("2024-01-01")).unwrap();

        let backup = BackupFile {
            version: BACKUP_VERSION,
            export_date: Some(Utc::now()),
            entries: vec![sample_entry("2024-01-01", 9)],
            saved_peptides: None,
        };
        let json = serde_json::to_string(&backup).unwrap();

        let result = services
            .backup
            .import_data(&json, &services.entries, &services.peptides)
            .unwrap();

        assert_eq!(result.added_count, 0);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(
            services.entries.find_by_date(date("2024-01-01")).unwrap(),
            original
        );
    }

    #[test]
    fn test_import_invalid_payload_changes_nothing() {
        let env = TestEnvironment::new().unwrap();
        let services = services(&env);
        save(&services, "2024-01-01", 5);

        for payload in [
            "not json at all",
            "{\"version\": 1}",
            "{\"entries\": \"nope\"}",
            "{\"entries\": [{\"id\": 42}]}",
        ] {
            let result =
                services
                    .backup
                    .import_data(payload, &services.entries, &services.peptides);
            assert!(
                matches!(result, Err(JournalError::InvalidFormat(_))),
                "payload should be rejected: {}",
                payload
            );
        }

        assert_eq!(services.entries.entry_count(), 1);
    }

    #[test]
    fn test_import_without_saved_peptides_keeps_registry() {
        let env = TestEnvironment::new().unwrap();
        let services = services(&env);
        let before = services.peptides.templates();

        let json = "{\"entries\": []}";
        services
            .backup
            .import_data(json, &services.entries, &services.peptides)
            .unwrap();

        assert_eq!(services.peptides.templates(), before);
    }

    #[test]
    fn test_backup_reminder_thresholds() {
        let env = TestEnvironment::new().unwrap();
        let services = services(&env);

        // Never backed up, few entries: quiet.
        assert_eq!(services.backup.check_backup_reminder(3).unwrap(), None);

        // Never backed up, a week of entries: tip.
        assert!(services.backup.check_backup_reminder(7).unwrap().is_some());

        // Fresh backup: quiet again.
        services
            .backup
            .export_data(&services.entries, &services.peptides)
            .unwrap();
        assert_eq!(services.backup.check_backup_reminder(7).unwrap(), None);

        // Stale backup: reminder, but only when entries exist.
        let meta = crate::storage::Connection::create_meta_repository(&env.connection);
        meta.set_timestamp(meta_keys::LAST_BACKUP, Utc::now() - chrono::Duration::days(15))
            .unwrap();
        assert!(services.backup.check_backup_reminder(1).unwrap().is_some());
        assert_eq!(services.backup.check_backup_reminder(0).unwrap(), None);
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("  /path/to/dir  "), "/path/to/dir");
        assert_eq!(sanitize_path("\"/path/to/dir\""), "/path/to/dir");
        assert_eq!(sanitize_path("'/path/to/dir'"), "/path/to/dir");
        assert_eq!(sanitize_path("/path\\ to\\ dir"), "/path to dir");
        assert_eq!(sanitize_path("/path/to/dir/"), "/path/to/dir");
    }

    #[test]
    fn test_export_to_path_custom_directory() {
        let env = TestEnvironment::new().unwrap();
        let services = services(&env);
        save(&services, "2024-01-15", 7);

        let export_dir = env.base_path.join("exports");
        let result = services
            .backup
            .export_to_path(
                Some(export_dir.to_string_lossy().to_string()),
                &services.entries,
                &services.peptides,
            )
            .unwrap();

        assert!(result.success, "{}", result.message);
        assert_eq!(result.entry_count, 1);

        let written = fs::read_to_string(&result.file_path).unwrap();
        let parsed = parse_backup(&written).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.version, BACKUP_VERSION);
    }
}
