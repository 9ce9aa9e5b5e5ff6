//! Task representation and handle pairing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::handle::{slot_pair, TaskHandle};
use crate::dispatch::trap;
use crate::stats::Stats;

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A queued unit of work, erased down to a boxed closure.
pub(crate) struct Task {
    pub(crate) id: TaskId,
    job: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Wrap `work` into a queueable task plus the handle observing it.
    ///
    /// The result type is erased here: the closure owns the promise, runs
    /// `work` with panics trapped, and fulfills the promise with whatever
    /// came out. The queue and workers only ever see `FnOnce()`.
    pub(crate) fn wrap<F, T>(work: F, stats: Arc<Stats>) -> (Task, TaskHandle<T>)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = TaskId::next();
        let (promise, handle) = slot_pair(id);
        let submitted = Instant::now();

        let job = Box::new(move || {
            stats.record_executed(submitted.elapsed());

            let outcome = trap::capture(work);
            if let Err(ref err) = outcome {
                stats.record_panic();
                tracing::warn!(task = id.as_u64(), "{err}");
            }

            promise.fulfill(outcome);
        });

        (Task { id, job }, handle)
    }

    /// Run the job. Consuming `self` makes a second run impossible.
    pub(crate) fn run(self) {
        (self.job)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish()
    }
}
