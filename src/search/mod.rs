//! Weighted substring search over changelog records
pub mod algorithms;
pub mod cache;
pub mod engine;
pub mod highlight;
pub mod index;
pub mod shared;

use crate::cli::MatchStrategy;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use engine::SearchEngine;
pub use highlight::highlight_ranges;
pub use shared::SharedEngine;

pub(crate) const FIELD_COUNT: usize = 8;

/// Score given to every hit found by the literal fallback scan
pub const FALLBACK_SCORE: f64 = 1.0;

/// A named searchable text derived from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Version,
    Summary,
    Category,
    Date,
    Status,
    Changes,
    DetailedInfo,
    Links,
}

impl Field {
    /// Canonical order; `match_fields` are always reported in this order
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Version,
        Field::Summary,
        Field::Category,
        Field::Date,
        Field::Status,
        Field::Changes,
        Field::DetailedInfo,
        Field::Links,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Summary => "summary",
            Field::Category => "category",
            Field::Date => "date",
            Field::Status => "status",
            Field::Changes => "changes",
            Field::DetailedInfo => "detailedInfo",
            Field::Links => "links",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative importance of each field. Only the ordering is load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub version: f64,
    pub summary: f64,
    pub category: f64,
    pub date: f64,
    pub status: f64,
    pub changes: f64,
    pub detailed_info: f64,
    pub links: f64,
}

impl FieldWeights {
    pub fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Version => self.version,
            Field::Summary => self.summary,
            Field::Category => self.category,
            Field::Date => self.date,
            Field::Status => self.status,
            Field::Changes => self.changes,
            Field::DetailedInfo => self.detailed_info,
            Field::Links => self.links,
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            version: 10.0,
            summary: 8.0,
            category: 6.0,
            date: 6.0,
            status: 5.0,
            changes: 4.0,
            detailed_info: 3.0,
            links: 2.0,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub strategy: MatchStrategy,
    pub weights: FieldWeights,
    /// Compiled size limit in bytes for the regex strategy
    pub regex_size_limit: usize,
    /// Capacity of the per-engine query cache; 0 disables it
    pub cache_size: usize,
    /// Longest query, in characters, handed to the matcher
    pub max_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Literal,
            weights: FieldWeights::default(),
            regex_size_limit: 1 << 20,
            cache_size: 64,
            max_query_len: 256,
        }
    }
}

/// One ranked record with the fields that contributed to its score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub record: Arc<Record>,
    pub score: f64,
    pub match_fields: Vec<Field>,
}

impl SearchResult {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn matched(&self, field: Field) -> bool {
        self.match_fields.contains(&field)
    }

    /// "summary, changes" style hint for renderers
    pub fn matched_in(&self) -> String {
        self.match_fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Trim and case-fold a query; `None` when nothing is left to search for.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(fold_case(trimmed))
    }
}

/// Lower-case for matching. Word-final sigma folds to σ, since
/// `str::to_lowercase` picks ς or σ from the surrounding letters.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase().replace('ς', "σ")
}

pub(crate) fn fold_char(c: char) -> char {
    if c == 'ς' {
        'σ'
    } else {
        c
    }
}
