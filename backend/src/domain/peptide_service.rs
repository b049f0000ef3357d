//! Peptide registry domain logic.
//!
//! The registry holds reusable dose templates plus a transient
//! "administered today" flag per template. Templates persist; the flags
//! exist only for the current session and reset after every successful
//! entry submit.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::info;

use crate::domain::errors::JournalError;
use crate::domain::models::entry::{AdministeredDose, JournalEntry};
use crate::domain::models::peptide::{default_templates, PeptideTemplate, RegisteredPeptide};
use crate::storage::{meta_keys, Connection, MetaStorage, PeptideStorage};

pub struct PeptideService<C: Connection> {
    peptides: Arc<Mutex<Vec<RegisteredPeptide>>>,
    repository: C::PeptideRepository,
    meta_repository: C::MetaRepository,
}

impl<C: Connection> PeptideService<C> {
    /// Create the service, loading stored templates with all flags off.
    /// A first launch (no stored registry at all) seeds the starter
    /// templates.
    pub fn new(connection: Arc<C>) -> Result<Self, JournalError> {
        let repository = connection.create_peptide_repository();
        let meta_repository = connection.create_meta_repository();

        let templates = match repository.load_templates()? {
            Some(templates) => templates,
            None => {
                info!("No stored registry, seeding default templates");
                default_templates()
            }
        };

        let peptides = templates
            .into_iter()
            .map(|template| RegisteredPeptide {
                template,
                administered: false,
            })
            .collect();

        Ok(Self {
            peptides: Arc::new(Mutex::new(peptides)),
            repository,
            meta_repository,
        })
    }

    /// Current registry rows in order.
    pub fn list(&self) -> Vec<RegisteredPeptide> {
        self.peptides.lock().unwrap().clone()
    }

    /// Persistent templates only, without the transient flags.
    pub fn templates(&self) -> Vec<PeptideTemplate> {
        self.peptides
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.template.clone())
            .collect()
    }

    /// Flip the administered flag of one row.
    pub fn toggle_administered(&self, index: usize) -> Result<bool, JournalError> {
        let mut peptides = self.peptides.lock().unwrap();
        let len = peptides.len();
        let peptide = peptides
            .get_mut(index)
            .ok_or(JournalError::IndexOutOfRange { index, len })?;

        peptide.administered = !peptide.administered;
        Ok(peptide.administered)
    }

    /// Add a template to the registry. New templates start checked: adding
    /// one mid-entry means "I am logging this now".
    pub fn add_template(&self, template: PeptideTemplate) -> Result<(), JournalError> {
        template.validate()?;

        let mut peptides = self.peptides.lock().unwrap();
        info!("Adding peptide template {}", template.name);
        peptides.push(RegisteredPeptide {
            template,
            administered: true,
        });

        self.persist(&peptides)
    }

    /// Remove a registry row, template and flag together.
    pub fn remove_template(&self, index: usize) -> Result<PeptideTemplate, JournalError> {
        let mut peptides = self.peptides.lock().unwrap();
        let len = peptides.len();
        if index >= len {
            return Err(JournalError::IndexOutOfRange { index, len });
        }

        let removed = peptides.remove(index);
        self.persist(&peptides)?;

        info!("Removed peptide template {}", removed.template.name);
        Ok(removed.template)
    }

    /// Clear every administered flag. Called after a successful submit.
    pub fn reset_administered_flags(&self) {
        let mut peptides = self.peptides.lock().unwrap();
        for peptide in peptides.iter_mut() {
            peptide.administered = false;
        }
    }

    /// Value copies of the checked templates, for building an entry's dose
    /// snapshot at submit time.
    pub fn snapshot_administered(&self) -> Vec<AdministeredDose> {
        self.peptides
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.administered)
            .map(|p| AdministeredDose {
                name: p.template.name.clone(),
                dosage: p.template.dosage,
                unit: p.template.unit,
                site: p.template.site.clone(),
            })
            .collect()
    }

    /// Re-mark the flags from an entry being edited: a template is checked
    /// when the entry logged a dose with its name.
    pub fn mark_administered_from(&self, entry: &JournalEntry) {
        let mut peptides = self.peptides.lock().unwrap();
        for peptide in peptides.iter_mut() {
            peptide.administered = entry
                .peptides
                .iter()
                .any(|dose| dose.name == peptide.template.name);
        }
    }

    /// Commit a restored template list wholesale, resetting all flags.
    pub fn replace_templates(
        &self,
        templates: Vec<PeptideTemplate>,
    ) -> Result<(), JournalError> {
        let mut peptides = self.peptides.lock().unwrap();
        *peptides = templates
            .into_iter()
            .map(|template| RegisteredPeptide {
                template,
                administered: false,
            })
            .collect();

        self.persist(&peptides)
    }

    fn persist(&self, peptides: &[RegisteredPeptide]) -> Result<(), JournalError> {
        let templates: Vec<PeptideTemplate> =
            peptides.iter().map(|p| p.template.clone()).collect();
        self.repository.save_templates(&templates)?;
        self.meta_repository
            .set_timestamp(meta_keys::LAST_SAVED, Utc::now())?;
        Ok(())
    }
}
