//! Per-field searchable index built once from the record collection
use crate::record::Record;
use crate::search::{Field, FIELD_COUNT, fold_case};
use std::collections::HashMap;
use std::sync::Arc;

/// Normalized searchable text of one record
#[derive(Debug)]
pub struct IndexedRecord {
    record: Arc<Record>,
    fields: [String; FIELD_COUNT],
    changes: Vec<String>,
}

impl IndexedRecord {
    fn new(record: Record) -> Self {
        let changes: Vec<String> = record
            .changes
            .iter()
            .map(|c| fold_case(&c.to_string()))
            .collect();

        let links = record
            .links
            .iter()
            .map(|l| l.label.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let fields = [
            fold_case(&record.version),
            fold_case(&record.summary),
            record
                .category
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            fold_case(&record.long_date()),
            fold_case(record.status.as_str()),
            changes.join(" "),
            record
                .detailed_info
                .as_deref()
                .map(fold_case)
                .unwrap_or_default(),
            fold_case(&links),
        ];

        Self {
            record: Arc::new(record),
            fields,
            changes,
        }
    }

    pub fn record(&self) -> &Arc<Record> {
        &self.record
    }

    /// Lower-cased text of a field; empty when the record has no such data
    pub fn text(&self, field: Field) -> &str {
        &self.fields[field.slot()]
    }

    /// Lower-cased "<kind> <text>" of each change entry, in record order
    pub fn changes(&self) -> &[String] {
        &self.changes
    }
}

/// Index over a fixed collection, in collection order
#[derive(Debug, Default)]
pub struct FieldIndex {
    entries: Vec<IndexedRecord>,
    by_id: HashMap<String, usize>,
}

impl FieldIndex {
    pub fn build(records: Vec<Record>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let entries: Vec<IndexedRecord> = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                by_id.entry(record.id.clone()).or_insert(position);
                IndexedRecord::new(record)
            })
            .collect();

        Self { entries, by_id }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedRecord> {
        self.entries.iter()
    }

    /// First record carrying `id`
    pub fn get(&self, id: &str) -> Option<&IndexedRecord> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct ids; lower than `len` when ids collide
    pub fn distinct_ids(&self) -> usize {
        self.by_id.len()
    }
}
