//! Per-engine LRU cache of ranked results keyed by normalized query
use crate::search::SearchResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

pub struct QueryCache {
    results: Mutex<LruCache<String, Vec<SearchResult>>>,
}

impl QueryCache {
    /// `None` when `capacity` is zero
    pub fn new(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            results: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn get(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.results.lock().get(query).cloned()
    }

    pub fn insert(&self, query: String, results: Vec<SearchResult>) {
        self.results.lock().put(query, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, Status};
    use crate::search::SearchEngine;
    use chrono::NaiveDate;

    #[test]
    fn test_zero_capacity_disables_cache() {
        assert!(QueryCache::new(0).is_none());
    }

    #[test]
    fn test_least_recently_used_entry_is_evicted() {
        let cache = QueryCache::new(2).unwrap();
        cache.insert("dark".to_string(), Vec::new());
        cache.insert("xss".to_string(), Vec::new());
        assert!(cache.get("dark").is_some());

        cache.insert("api".to_string(), Vec::new());

        assert!(cache.get("xss").is_none());
        assert!(cache.get("dark").is_some());
        assert!(cache.get("api").is_some());
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let cache = QueryCache::new(4).unwrap();
        cache.insert("dark".to_string(), Vec::new());
        let results = SearchEngine::build(vec![Record::new(
            "1",
            "2.5.0",
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            "Dark Mode",
            Status::Complete,
        )])
        .search("dark");
        cache.insert("dark".to_string(), results.clone());

        assert_eq!(cache.get("dark"), Some(results));
    }
}
