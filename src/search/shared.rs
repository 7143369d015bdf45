//! Shared engine handle with atomic index replacement
use crate::record::Record;
use crate::search::{SearchEngine, SearchResult};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Engine handle safe to share between threads.
///
/// Each query runs against one snapshot of the engine. `rebuild` indexes the
/// new collection before taking the write lock and publishes it with a single
/// pointer swap, so a query sees either the old engine or the new one, never
/// a mix of both.
#[derive(Clone)]
pub struct SharedEngine {
    current: Arc<RwLock<Arc<SearchEngine>>>,
}

impl SharedEngine {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// The engine currently published
    pub fn snapshot(&self) -> Arc<SearchEngine> {
        Arc::clone(&self.current.read())
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.snapshot().search(query)
    }

    /// Index a new collection with the current config and metrics, then swap it in
    pub fn rebuild(&self, records: Vec<Record>) {
        let previous = self.snapshot();
        let engine = SearchEngine::with_config(
            records,
            previous.config().clone(),
            Arc::clone(previous.metrics()),
        );
        self.replace(engine);
    }

    pub fn replace(&self, engine: SearchEngine) {
        let engine = Arc::new(engine);
        let count = engine.len();
        *self.current.write() = engine;
        info!("Published search index with {count} records");
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
