use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::handle::TaskHandle;
use crate::dispatch::queue::{Outcome, TaskQueue};
use crate::dispatch::task::Task;
use crate::dispatch::worker::{self, WorkerHandle};
use crate::error::Result;
use crate::stats::{Stats, StatsSnapshot};

/// Shared FIFO dispatcher: producers submit closures, workers drain them
/// in submission order until the queue is sealed.
///
/// Cloning is cheap and every clone drives the same queue, so producers
/// and controllers on different threads can each hold their own copy.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    queue: Arc<TaskQueue>,
    stats: Arc<Stats>,
    config: Arc<Config>,
    next_worker_id: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: Config) -> Self {
        let stats = Arc::new(Stats::new());
        Self {
            queue: Arc::new(TaskQueue::new(stats.clone())),
            stats,
            config: Arc::new(config),
            next_worker_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue `work` for execution and return the handle observing it.
    ///
    /// Never blocks; the queue is unbounded. Submitting stays legal after
    /// [`finish`](Dispatcher::finish) or [`interrupt`](Dispatcher::interrupt),
    /// but such a task only runs if a worker is still draining, and after an
    /// interrupt it never runs at all.
    pub fn submit<F, T>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (task, handle) = Task::wrap(work, self.stats.clone());
        self.stats.record_submitted();
        tracing::trace!(task = handle.id().as_u64(), "task submitted");
        self.queue.push(task);
        handle
    }

    /// Run the worker loop on the calling thread.
    ///
    /// Blocks until the queue is sealed: drains to empty after
    /// [`finish`](Dispatcher::finish), stops at the next task boundary after
    /// [`interrupt`](Dispatcher::interrupt).
    pub fn run(&self) -> Outcome {
        worker::drain(&self.queue)
    }

    /// Spawn one worker thread draining this dispatcher's queue.
    pub fn spawn_worker(&self) -> Result<WorkerHandle> {
        let id = self.next_worker_id.fetch_add(1, Ordering::Relaxed);
        worker::spawn(self.queue.clone(), &self.config, id)
    }

    /// Spawn a full pool of workers, sized by the config
    /// (defaults to the number of CPUs).
    pub fn spawn_pool(&self) -> Result<Vec<WorkerHandle>> {
        let count = self.config.worker_threads();
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            handles.push(self.spawn_worker()?);
        }
        Ok(handles)
    }

    /// Seal the queue for graceful shutdown: workers drain the remaining
    /// tasks, then stop with [`Outcome::Finished`].
    ///
    /// The first seal wins; calling this again, or after
    /// [`interrupt`](Dispatcher::interrupt), is a no-op.
    pub fn finish(&self) {
        self.queue.seal(Outcome::Finished);
    }

    /// Seal the queue for immediate shutdown: workers stop at the next task
    /// boundary with [`Outcome::Interrupted`], abandoning whatever is still
    /// queued. Abandoned handles never become ready.
    ///
    /// The first seal wins; calling this again, or after
    /// [`finish`](Dispatcher::finish), is a no-op.
    pub fn interrupt(&self) {
        self.queue.seal(Outcome::Interrupted);
    }

    /// Tasks queued and not yet picked up by a worker.
    pub fn pending_tasks(&self) -> usize {
        self.queue.pending_tasks()
    }

    /// Point-in-time view of the dispatcher's counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
