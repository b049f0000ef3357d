//! Domain model for a journal entry.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::JournalError;

/// One day's recorded wellness data.
///
/// Serialized field names match the backup interchange format
/// (`createdAt`/`updatedAt`), so stored blobs and exported backups are the
/// same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Opaque unique id in format: "entry::<epoch_millis>"
    pub id: String,
    /// Calendar date of the entry. Unique across all entries.
    pub date: NaiveDate,
    pub scores: ScoreSet,
    /// Doses administered on this day, snapshotted from the registry at
    /// submit time. Independent of the registry afterward.
    #[serde(default)]
    pub peptides: Vec<AdministeredDose>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Set once at creation, never changed.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every create or edit.
    pub updated_at: DateTime<Utc>,
}

/// The five subjective ratings recorded each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub wellness: u8,
    pub energy: u8,
    pub pain: u8,
    pub sleep: u8,
    pub mobility: u8,
}

/// Dosage unit for an administered peptide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    Mcg,
    Mg,
    Ml,
    Iu,
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DoseUnit::Mcg => "mcg",
            DoseUnit::Mg => "mg",
            DoseUnit::Ml => "ml",
            DoseUnit::Iu => "iu",
        };
        write!(f, "{}", label)
    }
}

/// A dose logged on a specific entry. Value copy of a template at submit
/// time; later registry edits do not reach back into past entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministeredDose {
    pub name: String,
    pub dosage: f64,
    pub unit: DoseUnit,
    #[serde(default)]
    pub site: Option<String>,
}

impl ScoreSet {
    /// Validate that every rating is within the closed range 1..=10.
    pub fn validate(&self) -> Result<(), JournalError> {
        let ratings = [
            ("wellness", self.wellness),
            ("energy", self.energy),
            ("pain", self.pain),
            ("sleep", self.sleep),
            ("mobility", self.mobility),
        ];
        for (name, value) in ratings {
            if !(1..=10).contains(&value) {
                return Err(JournalError::Validation(format!(
                    "{} score must be between 1 and 10, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl AdministeredDose {
    /// Validate a dose snapshot: non-empty name and a non-negative,
    /// finite dosage.
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.name.trim().is_empty() {
            return Err(JournalError::Validation(
                "peptide name must not be empty".to_string(),
            ));
        }
        if !self.dosage.is_finite() || self.dosage < 0.0 {
            return Err(JournalError::Validation(format!(
                "dosage for {} must be a non-negative number",
                self.name
            )));
        }
        Ok(())
    }
}

impl JournalEntry {
    /// Validate the entry's scores and dose snapshots.
    pub fn validate(&self) -> Result<(), JournalError> {
        self.scores.validate()?;
        for dose in &self.peptides {
            dose.validate()?;
        }
        Ok(())
    }
}
