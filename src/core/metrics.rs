//! Logger metrics for observability
//!
//! Counters describing what happened to records on the print path:
//! written, intercepted by a handler, rejected by the level gate, or
//! lost to a destination failure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_failed_write();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.failed_write_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records written through a formatter or the default composer
    total_logged: AtomicU64,

    /// Records fully handled by a handler
    handled_count: AtomicU64,

    /// Fan-out writes that reported an error
    failed_write_count: AtomicU64,

    /// Records rejected by the level gate
    gated_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            handled_count: AtomicU64::new(0),
            failed_write_count: AtomicU64::new(0),
            gated_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handled_count(&self) -> u64 {
        self.handled_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_write_count(&self) -> u64 {
        self.failed_write_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn gated_count(&self) -> u64 {
        self.gated_count.load(Ordering::Relaxed)
    }

    /// Record a written entry. Returns the previous count.
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handled(&self) -> u64 {
        self.handled_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_write_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_gated(&self) -> u64 {
        self.gated_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of written records whose fan-out reported an error (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let logged = self.total_logged();
        if logged == 0 {
            0.0
        } else {
            (self.failed_write_count() as f64 / logged as f64) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.handled_count.store(0, Ordering::Relaxed);
        self.failed_write_count.store(0, Ordering::Relaxed);
        self.gated_count.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            handled_count: AtomicU64::new(self.handled_count()),
            failed_write_count: AtomicU64::new(self.failed_write_count()),
            gated_count: AtomicU64::new(self.gated_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.handled_count(), 0);
        assert_eq!(metrics.failed_write_count(), 0);
        assert_eq!(metrics.gated_count(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_gated(), 0);
        assert_eq!(metrics.record_gated(), 1);
        assert_eq!(metrics.gated_count(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..4 {
            metrics.record_logged();
        }
        metrics.record_failed_write();

        assert_eq!(metrics.failure_rate(), 25.0);
    }

    #[test]
    fn test_metrics_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();
        metrics.record_handled();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(snapshot.total_logged(), 1);
        assert_eq!(snapshot.handled_count(), 1);
    }
}
