//! Connection to the JSON blob data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::storage::json::{EntryRepository, MetaRepository, PeptideRepository};
use crate::storage::traits::Connection;

/// JsonConnection manages the data directory and the blob files inside it.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("failed to create data directory {}", base_path.display())
            })?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new JSON connection in the default data directory
    /// (the platform data dir, falling back to a dotfolder in home).
    pub fn new_default() -> Result<Self> {
        let data_dir = match dirs::data_dir() {
            Some(dir) => dir.join("wellness-journal"),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("could not determine home directory"))?
                .join(".wellness-journal"),
        };

        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Path of the blob file for a logical key.
    pub fn blob_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Read a blob; `None` when the key was never written.
    pub fn read_blob(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.blob_path(file_name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    /// Write a blob through a temp file and an atomic rename.
    pub fn write_blob(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.blob_path(file_name);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, contents)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        Ok(())
    }
}

impl Connection for JsonConnection {
    type EntryRepository = EntryRepository;
    type PeptideRepository = PeptideRepository;
    type MetaRepository = MetaRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        EntryRepository::new(self.clone())
    }

    fn create_peptide_repository(&self) -> Self::PeptideRepository {
        PeptideRepository::new(self.clone())
    }

    fn create_meta_repository(&self) -> Self::MetaRepository {
        MetaRepository::new(self.clone())
    }
}
