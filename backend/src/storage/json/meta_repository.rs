//! JSON-backed housekeeping timestamps (last save, last backup).

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::MetaStorage;

const META_BLOB: &str = "meta.json";

/// Stores a small string-to-timestamp map as one JSON blob.
#[derive(Clone)]
pub struct MetaRepository {
    connection: JsonConnection,
}

impl MetaRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_map(&self) -> Result<BTreeMap<String, DateTime<Utc>>> {
        match self.connection.read_blob(META_BLOB)? {
            Some(contents) => {
                serde_json::from_str(&contents).context("failed to parse stored meta blob")
            }
            None => Ok(BTreeMap::new()),
        }
    }
}

impl MetaStorage for MetaRepository {
    fn get_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read_map()?.get(key).copied())
    }

    fn set_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);

        let contents =
            serde_json::to_string_pretty(&map).context("failed to serialize meta blob")?;
        self.connection.write_blob(META_BLOB, &contents)
    }
}
