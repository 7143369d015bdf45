//! Record store: materializes the changelog collection the engine indexes
use crate::error::{ClsearchError, Result};
use crate::record::Record;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUNDLED_CORPUS: &str = include_str!("../data/changelog.yaml");

/// An in-memory, validated collection of changelog records
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Validate and wrap a collection. Ids must be unique.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(ClsearchError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The release notes shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_CORPUS)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let records: Vec<Record> = serde_yaml::from_str(content)?;
        Self::from_records(records)
    }

    /// Load a collection from disk. `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let store = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
        .map_err(|e| match e {
            ClsearchError::DuplicateId(_) => e,
            other => ClsearchError::RecordFile {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        })?;

        debug!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
