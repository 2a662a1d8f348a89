//! Search and lookup counters.
//!
//! Counters are atomics shared behind `Arc`, so clones report into the same totals.
//! Every tracked event is also emitted as a structured `tracing` event.

use crate::search::SearchReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics for the directory service.
#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    searches_total: Arc<AtomicU64>,
    passthrough_total: Arc<AtomicU64>,
    companies_evaluated_total: Arc<AtomicU64>,
    load_failures_total: Arc<AtomicU64>,
    lookups_total: Arc<AtomicU64>,
    lookup_errors_total: Arc<AtomicU64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a ranked search.
    pub fn track_search(&self, report: &SearchReport, result_count: usize, duration_ms: u128) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        self.companies_evaluated_total
            .fetch_add(report.companies_evaluated as u64, Ordering::Relaxed);
        self.load_failures_total
            .fetch_add(report.loads_failed as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            companies = report.companies_evaluated,
            name_matches = report.name_matches,
            clients_scanned = report.clients_scanned,
            load_failures = report.loads_failed,
            result_count = result_count,
            "Search completed"
        );
    }

    /// Track an empty-query search answered with the index.
    pub fn track_passthrough(&self, company_count: usize) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        self.passthrough_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(companies = company_count, "Empty query, returning index");
    }

    /// Track a company listing or detail lookup.
    pub fn track_lookup(&self, operation: &str, success: bool) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        if success {
            tracing::trace!(operation = %operation, "Lookup succeeded");
        } else {
            self.lookup_errors_total.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(operation = %operation, "Lookup failed");
        }
    }

    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    pub fn passthrough_total(&self) -> u64 {
        self.passthrough_total.load(Ordering::Relaxed)
    }

    pub fn companies_evaluated_total(&self) -> u64 {
        self.companies_evaluated_total.load(Ordering::Relaxed)
    }

    pub fn load_failures_total(&self) -> u64 {
        self.load_failures_total.load(Ordering::Relaxed)
    }

    pub fn lookups_total(&self) -> u64 {
        self.lookups_total.load(Ordering::Relaxed)
    }

    pub fn lookup_errors_total(&self) -> u64 {
        self.lookup_errors_total.load(Ordering::Relaxed)
    }

    /// Share of company evaluations whose client load failed (0.0 to 1.0).
    pub fn load_failure_rate(&self) -> f64 {
        let evaluated = self.companies_evaluated_total() as f64;
        if evaluated == 0.0 {
            0.0
        } else {
            self.load_failures_total() as f64 / evaluated
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Searches: {} ({} passthrough)\n\
             Companies Evaluated: {}\n\
             Client Load Failures: {} ({:.2}% failure rate)\n\
             Lookups: {} ({} failed)",
            self.searches_total(),
            self.passthrough_total(),
            self.companies_evaluated_total(),
            self.load_failures_total(),
            self.load_failure_rate() * 100.0,
            self.lookups_total(),
            self.lookup_errors_total(),
        )
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Stop the timer and return the elapsed milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_start_at_zero() {
        let metrics = SearchMetrics::new();
        assert_eq!(metrics.searches_total(), 0);
        assert_eq!(metrics.load_failures_total(), 0);
        assert_eq!(metrics.load_failure_rate(), 0.0);
    }

    #[test]
    fn test_track_search() {
        let metrics = SearchMetrics::new();
        let report = SearchReport {
            companies_evaluated: 4,
            name_matches: 1,
            loads_failed: 1,
            clients_scanned: 20,
        };

        metrics.track_search(&report, 2, 5);
        assert_eq!(metrics.searches_total(), 1);
        assert_eq!(metrics.companies_evaluated_total(), 4);
        assert!((metrics.load_failure_rate() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_passthrough_counts_as_search() {
        let metrics = SearchMetrics::new();
        metrics.track_passthrough(10);
        assert_eq!(metrics.searches_total(), 1);
        assert_eq!(metrics.passthrough_total(), 1);
        assert_eq!(metrics.companies_evaluated_total(), 0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = SearchMetrics::new();
        let shared = metrics.clone();
        shared.track_lookup("get_company", false);
        assert_eq!(metrics.lookups_total(), 1);
        assert_eq!(metrics.lookup_errors_total(), 1);
    }

    #[test]
    fn test_summary() {
        let metrics = SearchMetrics::new();
        metrics.track_passthrough(3);
        let summary = metrics.summary();
        assert!(summary.contains("Searches: 1 (1 passthrough)"));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.finish() >= 10);
    }
}
