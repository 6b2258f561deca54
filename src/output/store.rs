//! JSON document store for the latest drinks result.
//!
//! The store is a single JSON object on disk. The result is written under one
//! key, last write wins, and any other keys in the document are left alone.

use crate::constants::store::TEMP_SUFFIX;
use crate::error::{Error, Result};
use crate::inference::Classification;
use crate::output::{DrinksResult, ResultSink};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed key/value store for [`DrinksResult`] records.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    key: String,
}

impl JsonStore {
    /// Create a store backed by `path`, writing under `key`.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write `result` under the store key, replacing any previous record.
    pub fn store(&self, result: &DrinksResult) -> Result<()> {
        let mut document = self.read_document()?;
        let record = serde_json::to_value(result).map_err(|e| Error::StoreSerialize { source: e })?;
        document.insert(self.key.clone(), record);

        let contents = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| Error::StoreSerialize { source: e })?;
        self.write_atomic(&contents)?;

        debug!("Stored result under '{}' in {}", self.key, self.path.display());
        Ok(())
    }

    /// Read the record under the store key, if the file and key exist.
    pub fn load(&self) -> Result<Option<DrinksResult>> {
        let document = self.read_document()?;
        document
            .get(&self.key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| Error::StoreParse {
                    path: self.path.clone(),
                    source: e,
                })
            })
            .transpose()
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| Error::StoreRead {
            path: self.path.clone(),
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents).map_err(|e| Error::StoreParse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        let write_error = |e: std::io::Error| Error::StoreWrite {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut temp = self.path.clone().into_os_string();
        temp.push(TEMP_SUFFIX);
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, contents).map_err(write_error)?;
        std::fs::rename(&temp, &self.path).map_err(write_error)
    }
}

impl ResultSink for JsonStore {
    fn write_result(&mut self, _frame: usize, classification: &Classification) -> Result<()> {
        self.store(&classification.decision.result)
    }
}
