use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day's journal entry as exchanged with the UI layer.
///
/// Dates are plain calendar dates (`YYYY-MM-DD`, no time component);
/// `created_at`/`updated_at` are RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque unique id in format: "entry::<epoch_millis>"
    pub id: String,
    /// Calendar date of the entry (ISO 8601, YYYY-MM-DD). Unique per entry.
    pub date: String,
    pub scores: EntryScores,
    /// Doses administered on this day, snapshotted from the registry at
    /// submit time.
    #[serde(default)]
    pub peptides: Vec<AdministeredPeptide>,
    #[serde(default)]
    pub notes: Option<String>,
    /// RFC 3339 timestamp, set once at creation
    pub created_at: String,
    /// RFC 3339 timestamp, refreshed on every edit
    pub updated_at: String,
}

impl Entry {
    /// Generate an entry id from a creation timestamp.
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("entry::{}", epoch_millis)
    }

    /// Parse an entry id to extract its creation timestamp.
    pub fn parse_id(id: &str) -> Result<u64, EntryIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "entry" {
            return Err(EntryIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| EntryIdError::InvalidTimestamp)
    }

    /// Extract the creation timestamp from this entry's id.
    pub fn extract_timestamp(&self) -> Result<u64, EntryIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIdError::InvalidFormat => write!(f, "Invalid entry ID format"),
            EntryIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entry ID"),
        }
    }
}

impl std::error::Error for EntryIdError {}

/// The five subjective ratings recorded each day, each in 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryScores {
    pub wellness: u8,
    pub energy: u8,
    pub pain: u8,
    pub sleep: u8,
    pub mobility: u8,
}

/// A dose logged on a specific entry. Value copy of a template; edits to
/// the registry never reach back into past entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministeredPeptide {
    pub name: String,
    pub dosage: f64,
    pub unit: DoseUnit,
    #[serde(default)]
    pub site: Option<String>,
}

/// Dosage unit for a peptide dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Mcg,
    Mg,
    Ml,
    Iu,
}

impl DoseUnit {
    /// Short label as shown next to dosage values in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            DoseUnit::Mcg => "mcg",
            DoseUnit::Mg => "mg",
            DoseUnit::Ml => "ml",
            DoseUnit::Iu => "iu",
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A reusable peptide definition kept in the registry, distinct from any
/// specific day's logged dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideTemplate {
    pub name: String,
    pub dosage: f64,
    pub unit: DoseUnit,
    #[serde(default)]
    pub site: Option<String>,
}

/// One row of the registry as shown on the entry form: the template plus
/// its transient "administered today" checkbox state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub template: PeptideTemplate,
    pub administered: bool,
}

/// Request to save a new entry from the entry form.
///
/// The administered doses are not part of the request; the backend
/// snapshots them from the registry's checked templates at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEntryRequest {
    pub date: String,
    pub scores: EntryScores,
    pub notes: Option<String>,
    /// Explicit confirmation that an existing entry on the same date may
    /// be replaced. When false and a conflict exists, the save is refused
    /// and the conflict is reported so the UI can ask the user.
    pub overwrite: bool,
}

/// Outcome of a save: either the stored entry or a conflict the UI must
/// resolve by re-submitting with `overwrite = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveEntryResponse {
    Saved {
        entry: Entry,
        success_message: String,
    },
    Conflict {
        date: String,
    },
}

/// Request to update an existing entry (edit flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub id: String,
    pub date: String,
    pub scores: EntryScores,
    pub notes: Option<String>,
}

/// Response after updating an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryResponse {
    pub entry: Entry,
    pub success_message: String,
}

/// Request to delete an entry by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryRequest {
    pub id: String,
}

/// Response after deleting an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// Response containing the full history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<Entry>,
}

/// Request to start editing an entry from the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginEditRequest {
    pub id: String,
}

/// Response when the UI starts editing an entry: the entry to populate
/// the form with. The backend also re-marks the registry checkboxes from
/// the entry's logged doses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginEditResponse {
    pub entry: Entry,
}

/// Request to add a peptide template to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPeptideRequest {
    pub name: String,
    pub dosage: f64,
    pub unit: DoseUnit,
    pub site: Option<String>,
}

/// Request addressing a registry row by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideIndexRequest {
    pub index: usize,
}

/// Response containing the current registry rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryListResponse {
    pub peptides: Vec<RegistryItem>,
}

/// Request to change the analytics window. `days = None` means all time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAnalyticsWindowRequest {
    pub days: Option<u32>,
}

/// Summary cards for the analytics view. Averages are `None` when the
/// window contains no entries ("no data" is not an average of zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummaryResponse {
    pub avg_wellness: Option<f64>,
    pub avg_energy: Option<f64>,
    pub avg_pain: Option<f64>,
    pub entry_count: usize,
}

/// Aggregate usage of one peptide across the filtered window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideUsageRow {
    pub name: String,
    pub dose_count: u32,
    pub total_dosage: f64,
    pub unit: DoseUnit,
}

/// Response listing peptide usage, most frequently dosed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideUsageResponse {
    pub rows: Vec<PeptideUsageRow>,
}

/// Chart-ready projection of the filtered entries: one label per entry
/// (oldest first) and positionally aligned score series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesResponse {
    pub labels: Vec<String>,
    pub wellness: Vec<u8>,
    pub energy: Vec<u8>,
    pub pain: Vec<u8>,
    pub sleep: Vec<u8>,
    pub mobility: Vec<u8>,
}

/// Response with the serialized backup and a suggested filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub json_content: String,
    pub filename: String,
    pub entry_count: usize,
}

/// Request to export the backup file straight to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Directory to write into; falls back to Documents (then home) when
    /// absent or blank.
    pub custom_path: Option<String>,
}

/// Response after exporting to a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub entry_count: usize,
}

/// Request to restore from a backup file's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDataRequest {
    pub json_content: String,
}

/// Response after a restore: how many entries were added and how many
/// were skipped as duplicates of existing dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDataResponse {
    pub added_count: usize,
    pub skipped_count: usize,
    pub entry_count: usize,
    pub success_message: String,
}

/// Response with an optional backup-reminder message for the UI toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupReminderResponse {
    pub reminder: Option<String>,
}
