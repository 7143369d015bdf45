//! Query execution and ranking
use crate::metrics::Metrics;
use crate::record::Record;
use crate::search::algorithms::{Matcher, create_matcher};
use crate::search::cache::QueryCache;
use crate::search::index::{FieldIndex, IndexedRecord};
use crate::search::{
    FALLBACK_SCORE, Field, SearchConfig, SearchResult, fold_case, normalize_query,
};
use log::{debug, warn};
use std::sync::Arc;

/// Ranks a fixed record collection against free-text queries.
///
/// The index is built once and never mutated; to search a different
/// collection build a new engine (see [`crate::search::SharedEngine`] for
/// swapping one in while other callers are querying).
pub struct SearchEngine {
    index: FieldIndex,
    config: SearchConfig,
    metrics: Arc<Metrics>,
    cache: Option<QueryCache>,
}

impl SearchEngine {
    /// Build an engine with default weights and a fresh metrics registry
    pub fn build(records: Vec<Record>) -> Self {
        Self::with_config(records, SearchConfig::default(), Arc::new(Metrics::new()))
    }

    pub fn with_config(records: Vec<Record>, config: SearchConfig, metrics: Arc<Metrics>) -> Self {
        let index = FieldIndex::build(records);
        if index.distinct_ids() < index.len() {
            warn!(
                "Indexed {} records but only {} distinct ids",
                index.len(),
                index.distinct_ids()
            );
        }
        debug!(
            "Indexed {} records (strategy: {}, cache size: {})",
            index.len(),
            config.strategy,
            config.cache_size
        );

        Self {
            cache: QueryCache::new(config.cache_size),
            index,
            config,
            metrics,
        }
    }

    /// Rank every record containing the query in at least one field.
    ///
    /// Empty or whitespace-only queries yield no results. The output is
    /// sorted by descending score; ties keep collection order. This never
    /// fails: if the configured matcher cannot be built the query is
    /// answered by a plain substring scan instead.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.metrics.queries_total.inc();

        let Some(needle) = normalize_query(query) else {
            self.metrics.empty_queries_total.inc();
            return Vec::new();
        };

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&needle) {
                self.metrics.cache_hits_total.inc();
                self.metrics.results_returned_total.inc_by(hit.len() as u64);
                return hit;
            }
            self.metrics.cache_misses_total.inc();
        }

        let results = match create_matcher(&self.config, &needle) {
            Ok(matcher) => self.rank(matcher.as_ref()),
            Err(e) => {
                warn!("Falling back to literal scan for {needle:?}: {e}");
                self.metrics.fallback_total.inc();
                self.fallback_search(&needle)
            }
        };

        self.metrics
            .results_returned_total
            .inc_by(results.len() as u64);
        if let Some(cache) = &self.cache {
            cache.insert(needle, results.clone());
        }
        results
    }

    fn rank(&self, matcher: &dyn Matcher) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .index
            .iter()
            .filter_map(|entry| self.score_entry(entry, matcher))
            .collect();
        sort_by_score(&mut results);
        results
    }

    fn score_entry(&self, entry: &IndexedRecord, matcher: &dyn Matcher) -> Option<SearchResult> {
        let mut score = 0.0;
        let mut match_fields = Vec::new();

        for field in Field::ALL {
            if !matcher.is_match(entry.text(field)) {
                continue;
            }
            // Changes count once per matching entry, at least once when the
            // hit spans two entries of the joined text
            let hits = match field {
                Field::Changes => matcher.count_matches(entry.changes()).max(1),
                _ => 1,
            };
            score += self.config.weights.weight(field) * hits as f64;
            match_fields.push(field);
        }

        if match_fields.is_empty() {
            return None;
        }
        Some(SearchResult {
            record: Arc::clone(entry.record()),
            score,
            match_fields,
        })
    }

    /// Coarse scan over version, summary and change texts with `str::contains`.
    /// Every hit scores [`FALLBACK_SCORE`].
    pub(crate) fn fallback_search(&self, needle: &str) -> Vec<SearchResult> {
        self.index
            .iter()
            .filter_map(|entry| {
                let record = entry.record();
                let mut match_fields = Vec::new();
                if fold_case(&record.version).contains(needle) {
                    match_fields.push(Field::Version);
                }
                if fold_case(&record.summary).contains(needle) {
                    match_fields.push(Field::Summary);
                }
                if record
                    .changes
                    .iter()
                    .any(|c| fold_case(&c.text).contains(needle))
                {
                    match_fields.push(Field::Changes);
                }

                (!match_fields.is_empty()).then(|| SearchResult {
                    record: Arc::clone(record),
                    score: FALLBACK_SCORE,
                    match_fields,
                })
            })
            .collect()
    }

    /// First record with `id`
    pub fn get(&self, id: &str) -> Option<&Arc<Record>> {
        self.index.get(id).map(IndexedRecord::record)
    }

    /// Records in collection order
    pub fn records(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.index.iter().map(IndexedRecord::record)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

/// Descending by score. `sort_by` is stable, so ties keep collection order.
fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ChangeKind, Status};
    use chrono::NaiveDate;

    fn record(id: &str, version: &str, summary: &str) -> Record {
        Record::new(
            id,
            version,
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            summary,
            Status::Complete,
        )
    }

    fn forced_fallback() -> SearchConfig {
        SearchConfig {
            max_query_len: 2,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_fallback_scans_version_summary_and_change_text() {
        let engine = SearchEngine::build(vec![
            record("1", "2.5.0", "Dark Mode").with_change(ChangeKind::Added, "Theme toggle"),
            record("2", "2.4.3", "Security").with_detailed_info("dark theme notes"),
        ]);

        let results = engine.fallback_search("dark");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "1");
        assert_eq!(results[0].match_fields, vec![Field::Summary]);
        assert_eq!(results[0].score, FALLBACK_SCORE);

        let results = engine.fallback_search("toggle");
        assert_eq!(results[0].match_fields, vec![Field::Changes]);
    }

    #[test]
    fn test_fallback_ignores_change_kind() {
        let engine = SearchEngine::build(vec![
            record("1", "1.0.0", "Initial").with_change(ChangeKind::Added, "Things"),
        ]);
        assert!(engine.fallback_search("added").is_empty());
        assert_eq!(engine.search("added").len(), 1);
    }

    #[test]
    fn test_matcher_failure_is_absorbed() {
        let metrics = Arc::new(Metrics::new());
        let engine = SearchEngine::with_config(
            vec![record("1", "2.5.0", "Dark Mode"), record("2", "2.4.3", "Dark Days")],
            forced_fallback(),
            Arc::clone(&metrics),
        );

        let results = engine.search("  DARK ");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id(), "1");
        assert_eq!(results[1].id(), "2");
        assert!(results.iter().all(|r| r.score == FALLBACK_SCORE));
        assert_eq!(metrics.fallback_total.get(), 1);
    }

    #[test]
    fn test_cache_returns_identical_results() {
        let metrics = Arc::new(Metrics::new());
        let engine = SearchEngine::with_config(
            vec![record("1", "2.5.0", "Dark Mode")],
            SearchConfig::default(),
            Arc::clone(&metrics),
        );

        let first = engine.search("dark");
        let second = engine.search("DARK");
        assert_eq!(first, second);
        assert_eq!(metrics.cache_misses_total.get(), 1);
        assert_eq!(metrics.cache_hits_total.get(), 1);
    }

    #[test]
    fn test_disabled_cache_still_counts_queries() {
        let metrics = Arc::new(Metrics::new());
        let config = SearchConfig {
            cache_size: 0,
            ..SearchConfig::default()
        };
        let engine =
            SearchEngine::with_config(vec![record("1", "2.5.0", "Dark")], config, Arc::clone(&metrics));

        engine.search("dark");
        engine.search("   ");
        assert_eq!(metrics.queries_total.get(), 2);
        assert_eq!(metrics.empty_queries_total.get(), 1);
        assert_eq!(metrics.cache_hits_total.get(), 0);
        assert_eq!(metrics.results_returned_total.get(), 1);
    }

    #[test]
    fn test_get_and_records_preserve_order() {
        let engine = SearchEngine::build(vec![
            record("b", "1.1.0", "Second"),
            record("a", "1.0.0", "First"),
        ]);
        let ids: Vec<&str> = engine.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(engine.get("a").unwrap().summary, "First");
        assert!(engine.get("missing").is_none());
    }
}
