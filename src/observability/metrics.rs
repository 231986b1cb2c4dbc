//! Search metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::search::SearchMode;

/// Operational counters.
///
/// All counters use Relaxed atomics; readers may observe a snapshot that is
/// momentarily behind concurrent writers.
#[derive(Debug, Default)]
pub struct SearchMetrics {
    products_only: AtomicU64,
    with_aggs: AtomicU64,
    with_filtered_aggs: AtomicU64,
    searches_rejected: AtomicU64,
    searches_failed: AtomicU64,
    products_indexed: AtomicU64,
    bulk_chunks: AtomicU64,
}

impl SearchMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a search that reached the engine and succeeded
    pub fn record_executed(&self, mode: SearchMode) {
        let counter = match mode {
            SearchMode::ProductsOnly => &self.products_only,
            SearchMode::ProductsWithAggs => &self.with_aggs,
            SearchMode::ProductsWithFilteredAggs => &self.with_filtered_aggs,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request rejected before planning
    pub fn record_rejected(&self) {
        self.searches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a transport or engine failure
    pub fn record_failed(&self) {
        self.searches_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one bulk chunk of `documents` products
    pub fn record_bulk_chunk(&self, documents: u64) {
        self.bulk_chunks.fetch_add(1, Ordering::Relaxed);
        self.products_indexed.fetch_add(documents, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let products_only = self.products_only.load(Ordering::Relaxed);
        let with_aggs = self.with_aggs.load(Ordering::Relaxed);
        let with_filtered_aggs = self.with_filtered_aggs.load(Ordering::Relaxed);

        MetricsSnapshot {
            searches_executed: products_only + with_aggs + with_filtered_aggs,
            products_only,
            products_with_aggs: with_aggs,
            products_with_filtered_aggs: with_filtered_aggs,
            searches_rejected: self.searches_rejected.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
            products_indexed: self.products_indexed.load(Ordering::Relaxed),
            bulk_chunks: self.bulk_chunks.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub searches_executed: u64,
    pub products_only: u64,
    pub products_with_aggs: u64,
    pub products_with_filtered_aggs: u64,
    pub searches_rejected: u64,
    pub searches_failed: u64,
    pub products_indexed: u64,
    pub bulk_chunks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = SearchMetrics::new().snapshot();
        assert_eq!(snapshot.searches_executed, 0);
        assert_eq!(snapshot.products_indexed, 0);
    }

    #[test]
    fn test_executed_per_mode() {
        let metrics = SearchMetrics::new();
        metrics.record_executed(SearchMode::ProductsOnly);
        metrics.record_executed(SearchMode::ProductsWithFilteredAggs);
        metrics.record_executed(SearchMode::ProductsWithFilteredAggs);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.searches_executed, 3);
        assert_eq!(snapshot.products_only, 1);
        assert_eq!(snapshot.products_with_aggs, 0);
        assert_eq!(snapshot.products_with_filtered_aggs, 2);
    }

    #[test]
    fn test_bulk_counters() {
        let metrics = SearchMetrics::new();
        metrics.record_bulk_chunk(1000);
        metrics.record_bulk_chunk(250);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.bulk_chunks, 2);
        assert_eq!(snapshot.products_indexed, 1250);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = SearchMetrics::new();
        metrics.record_rejected();
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["searches_rejected"], 1);
    }
}
