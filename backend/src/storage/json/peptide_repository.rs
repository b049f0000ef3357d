//! JSON-backed peptide template repository.

use anyhow::{Context, Result};

use crate::domain::models::peptide::PeptideTemplate;
use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::PeptideStorage;

const PEPTIDES_BLOB: &str = "peptides.json";

/// Stores the template registry as one JSON blob. Administered flags are
/// transient and never reach this layer.
#[derive(Clone)]
pub struct PeptideRepository {
    connection: JsonConnection,
}

impl PeptideRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl PeptideStorage for PeptideRepository {
    fn load_templates(&self) -> Result<Option<Vec<PeptideTemplate>>> {
        match self.connection.read_blob(PEPTIDES_BLOB)? {
            Some(contents) => {
                let templates: Vec<PeptideTemplate> = serde_json::from_str(&contents)
                    .context("failed to parse stored peptide templates")?;
                Ok(Some(templates))
            }
            None => Ok(None),
        }
    }

    fn save_templates(&self, templates: &[PeptideTemplate]) -> Result<()> {
        let contents = serde_json::to_string_pretty(templates)
            .context("failed to serialize peptide templates")?;
        self.connection.write_blob(PEPTIDES_BLOB, &contents)
    }
}
