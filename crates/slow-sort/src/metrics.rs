//! Metrics for slow-list accesses and sort runs
//!
//! Counts every simulated read and write together with the latency it cost,
//! plus how sort runs ended.
//!
//! ## Usage
//!
//! ```ignore
//! use slow_sort::{SlowList, SortMetrics};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(SortMetrics::new());
//! let list = SlowList::new(vec![3, 1, 2]).with_metrics(Arc::clone(&metrics));
//! // ... sort ...
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Thread-safe counters shared between lists and the service
#[derive(Debug, Default)]
pub struct SortMetrics {
    /// Total reads performed
    pub reads: AtomicU64,
    /// Total writes performed
    pub writes: AtomicU64,
    /// Cumulative simulated latency in nanoseconds
    pub simulated_latency_ns: AtomicU64,
    /// Sort runs that returned `Ok`
    pub runs_completed: AtomicU64,
    /// Sort runs that observed a fired cancellation signal
    pub runs_cancelled: AtomicU64,
}

impl SortMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&self, latency: Duration) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    pub fn record_write(&self, latency: Duration) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    pub fn record_run(&self, completed: bool) {
        if completed {
            self.runs_completed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.runs_cancelled.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn add_latency(&self, latency: Duration) {
        self.simulated_latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Cumulative simulated latency at full precision
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_nanos(self.simulated_latency_ns.load(Ordering::Relaxed))
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            simulated_latency_ms: self.simulated_latency_ns.load(Ordering::Relaxed) / 1_000_000,
            runs_completed: self.runs_completed.load(Ordering::Relaxed),
            runs_cancelled: self.runs_cancelled.load(Ordering::Relaxed),
        }
    }

    /// Fold the counters of a finished per-run collector into this one
    pub fn absorb(&self, run: &SortMetrics) {
        for (total, part) in [
            (&self.reads, &run.reads),
            (&self.writes, &run.writes),
            (&self.simulated_latency_ns, &run.simulated_latency_ns),
            (&self.runs_completed, &run.runs_completed),
            (&self.runs_cancelled, &run.runs_cancelled),
        ] {
            total.fetch_add(part.load(Ordering::Relaxed), Ordering::Relaxed);
        }
    }
}

/// Point-in-time copy of [`SortMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub simulated_latency_ms: u64,
    pub runs_completed: u64,
    pub runs_cancelled: u64,
}
