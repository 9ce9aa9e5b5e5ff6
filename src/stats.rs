//! Dispatcher counters and queue-wait tracking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use parking_lot::RwLock;

/// Internal collector shared by the queue, the task wrappers and the
/// dispatcher surface.
#[derive(Debug)]
pub(crate) struct Stats {
    // Task counters
    tasks_submitted: AtomicU64,
    tasks_executed: AtomicU64,
    tasks_panicked: AtomicU64,
    tasks_abandoned: AtomicU64,

    // Time from submit to the start of execution (RwLock for interior mutability)
    queue_wait: RwLock<Histogram<u64>>,

    start_time: Instant,
}

impl Stats {
    pub(crate) fn new() -> Self {
        // 3 significant figures, max value of 1 hour in nanoseconds
        let histogram =
            Histogram::new_with_max(3_600_000_000_000, 3).expect("Failed to create histogram");

        Self {
            tasks_submitted: AtomicU64::new(0),
            tasks_executed: AtomicU64::new(0),
            tasks_panicked: AtomicU64::new(0),
            tasks_abandoned: AtomicU64::new(0),
            queue_wait: RwLock::new(histogram),
            start_time: Instant::now(),
        }
    }

    pub(crate) fn record_submitted(&self) {
        self.tasks_submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a task leaving the queue and starting to run.
    pub(crate) fn record_executed(&self, queue_wait: Duration) {
        self.tasks_executed.fetch_add(1, Ordering::Relaxed);

        if let Some(mut hist) = self.queue_wait.try_write() {
            let _ = hist.record(queue_wait.as_nanos() as u64);
        }
    }

    pub(crate) fn record_panic(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record tasks dropped without ever running.
    pub(crate) fn record_abandoned(&self, count: u64) {
        self.tasks_abandoned.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        let histogram = self.queue_wait.read();

        StatsSnapshot {
            uptime: self.start_time.elapsed(),
            tasks_submitted: self.tasks_submitted.load(Ordering::Relaxed),
            tasks_executed: self.tasks_executed.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            tasks_abandoned: self.tasks_abandoned.load(Ordering::Relaxed),
            avg_queue_wait_ns: if histogram.len() > 0 {
                histogram.mean() as u64
            } else {
                0
            },
            p50_queue_wait_ns: histogram.value_at_quantile(0.50),
            p99_queue_wait_ns: histogram.value_at_quantile(0.99),
            max_queue_wait_ns: histogram.max(),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the dispatcher's counters.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub uptime: Duration,
    pub tasks_submitted: u64,
    pub tasks_executed: u64,
    pub tasks_panicked: u64,
    pub tasks_abandoned: u64,
    pub avg_queue_wait_ns: u64,
    pub p50_queue_wait_ns: u64,
    pub p99_queue_wait_ns: u64,
    pub max_queue_wait_ns: u64,
}

impl StatsSnapshot {
    /// Tasks executed per second of dispatcher lifetime.
    pub fn throughput(&self) -> f64 {
        let seconds = self.uptime.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.tasks_executed as f64 / seconds
    }
}
