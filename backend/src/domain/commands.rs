//! Domain-level command and query types
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The io layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod entries {
    use chrono::NaiveDate;

    use crate::domain::models::entry::{AdministeredDose, JournalEntry, ScoreSet};

    /// Input for saving a new entry from the entry form.
    #[derive(Debug, Clone)]
    pub struct SaveEntryCommand {
        pub date: NaiveDate,
        pub scores: ScoreSet,
        pub notes: Option<String>,
        /// Doses snapshotted from the registry's checked templates.
        pub peptides: Vec<AdministeredDose>,
        /// Explicit confirmation that an existing entry for the same date
        /// may be replaced.
        pub overwrite: bool,
    }

    /// Outcome of a save. A conflict is a policy decision for the caller,
    /// not an error: nothing was mutated and the save can be re-issued with
    /// `overwrite = true`.
    #[derive(Debug, Clone)]
    pub enum SaveEntryResult {
        Saved(JournalEntry),
        Conflict { date: NaiveDate },
    }

    /// Input for editing an existing entry. Replaces every field except the
    /// entry's id and creation timestamp.
    #[derive(Debug, Clone)]
    pub struct UpdateEntryCommand {
        pub id: String,
        pub date: NaiveDate,
        pub scores: ScoreSet,
        pub notes: Option<String>,
        pub peptides: Vec<AdministeredDose>,
    }
}

pub mod analytics {
    use chrono::NaiveDate;

    use crate::domain::models::entry::DoseUnit;

    /// The date-range filter applied before computing analytics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AnalyticsWindow {
        /// The last `n` calendar days ending at the reference date.
        Days(u32),
        AllTime,
    }

    /// Averages for the summary cards. `None` when the window holds no
    /// entries, since "no data" is distinct from an average of zero.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ScoreSummary {
        pub avg_wellness: Option<f64>,
        pub avg_energy: Option<f64>,
        pub avg_pain: Option<f64>,
        pub entry_count: usize,
    }

    /// Aggregate usage of one peptide across the filtered window.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PeptideUsage {
        pub name: String,
        /// Number of dose occurrences; a peptide logged twice in one entry
        /// counts twice.
        pub dose_count: u32,
        pub total_dosage: f64,
        /// Unit of the first occurrence seen; mixed units for the same name
        /// are not reconciled.
        pub unit: DoseUnit,
    }

    /// Chart-ready projection: one label per filtered entry (oldest first)
    /// with positionally aligned score series.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct TimeSeries {
        pub labels: Vec<NaiveDate>,
        pub wellness: Vec<u8>,
        pub energy: Vec<u8>,
        pub pain: Vec<u8>,
        pub sleep: Vec<u8>,
        pub mobility: Vec<u8>,
    }
}

pub mod backup {
    use crate::domain::models::entry::JournalEntry;

    /// Result of the deduplicating restore merge.
    #[derive(Debug, Clone)]
    pub struct MergeResult {
        /// Union of current and incoming entries, sorted newest-first.
        pub merged: Vec<JournalEntry>,
        /// Incoming entries whose date was not already present.
        pub added_count: usize,
    }

    /// Result of serializing the journal for export.
    #[derive(Debug, Clone)]
    pub struct ExportDataResult {
        pub json_content: String,
        pub filename: String,
        pub entry_count: usize,
    }

    /// Result of writing the export file to disk.
    #[derive(Debug, Clone)]
    pub struct ExportToPathResult {
        pub success: bool,
        pub message: String,
        pub file_path: String,
        pub entry_count: usize,
    }

    /// Result of restoring from a backup payload.
    #[derive(Debug, Clone)]
    pub struct ImportDataResult {
        pub added_count: usize,
        pub skipped_count: usize,
        /// Total entries after the merge was committed.
        pub entry_count: usize,
    }
}
