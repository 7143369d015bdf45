use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub queries_total: IntCounter,
    pub empty_queries_total: IntCounter,
    pub fallback_total: IntCounter,
    pub results_returned_total: IntCounter,
    pub cache_hits_total: IntCounter,
    pub cache_misses_total: IntCounter,
    registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::with_opts(Opts::new(name, help))
        .expect("counter name and help are static and valid");
    registry.register(Box::new(counter.clone())).ok();
    counter
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        Metrics {
            queries_total: counter(&registry, "queries_total", "Number of search calls"),
            empty_queries_total: counter(
                &registry,
                "empty_queries_total",
                "Number of empty or whitespace-only queries",
            ),
            fallback_total: counter(
                &registry,
                "fallback_total",
                "Number of queries answered by the literal fallback scan",
            ),
            results_returned_total: counter(
                &registry,
                "results_returned_total",
                "Number of ranked results returned",
            ),
            cache_hits_total: counter(&registry, "cache_hits_total", "Query cache hits"),
            cache_misses_total: counter(&registry, "cache_misses_total", "Query cache misses"),
            registry: Arc::new(registry),
        }
    }

    pub fn gather(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_reports_counters() {
        let metrics = Metrics::new();
        metrics.queries_total.inc_by(3);
        metrics.fallback_total.inc();

        let text = metrics.gather();
        assert!(text.contains("queries_total 3"));
        assert!(text.contains("fallback_total 1"));
        assert!(text.contains("cache_hits_total 0"));
    }
}
