//! Domain model for the peptide template registry.

use serde::{Deserialize, Serialize};

use crate::domain::errors::JournalError;
use crate::domain::models::entry::DoseUnit;

/// A reusable peptide definition: the default dose the user logs when they
/// check this peptide off on the entry form.
///
/// Duplicate names are permitted; the same peptide may be registered twice
/// with different sites or doses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideTemplate {
    pub name: String,
    pub dosage: f64,
    pub unit: DoseUnit,
    #[serde(default)]
    pub site: Option<String>,
}

/// A registry row: the persistent template merged with its transient
/// "administered today" flag. Keeping both in one entity means the flag can
/// never drift out of alignment with its template.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredPeptide {
    pub template: PeptideTemplate,
    pub administered: bool,
}

impl PeptideTemplate {
    /// Validate a template: non-empty name and a non-negative, finite
    /// dosage.
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

/// Starter templates seeded on first launch, before the user has stored a
/// registry of their own.
pub fn default_templates() -> Vec<PeptideTemplate> {
    vec![
        PeptideTemplate {
            name: "BPC-157".to_string(),
            dosage: 250.0,
            unit: DoseUnit::Mcg,
            site: Some("Abdomen".to_string()),
        },
        PeptideTemplate {
            name: "TB-500".to_string(),
            dosage: 2.5,
            unit: DoseUnit::Mg,
            site: Some("Thigh".to_string()),
        },
    ]
}
