// worker side: the drain loop and the threads that run it

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::dispatch::queue::{Outcome, Step, TaskQueue};
use crate::dispatch::trap;
use crate::error::{Error, Result};

pub type WorkerId = usize;

/// Drain the queue on the calling thread until it is sealed.
///
/// Task panics are trapped inside the job itself, so the loop never
/// unwinds; it only ever returns the queue's terminal outcome.
pub(crate) fn drain(queue: &TaskQueue) -> Outcome {
    loop {
        match queue.next_step() {
            Step::Execute(task) => task.run(),
            Step::Stop(outcome) => return outcome,
        }
    }
}

/// Spawn a named worker thread running the drain loop.
pub(crate) fn spawn(queue: Arc<TaskQueue>, config: &Config, id: WorkerId) -> Result<WorkerHandle> {
    let name = format!("{}-{}", config.thread_name_prefix, id);

    let mut builder = thread::Builder::new().name(name);
    if let Some(stack_size) = config.stack_size {
        builder = builder.stack_size(stack_size);
    }

    // the thread keeps its own reference to the queue alive
    let thread = builder.spawn(move || {
        tracing::debug!(worker = id, "worker started");
        let outcome = drain(&queue);
        tracing::debug!(worker = id, ?outcome, "worker stopped");
        outcome
    })?;

    Ok(WorkerHandle { id, thread })
}

/// Owning handle to a spawned worker thread.
#[derive(Debug)]
pub struct WorkerHandle {
    id: WorkerId,
    thread: JoinHandle<Outcome>,
}

impl WorkerHandle {
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Non-blocking check whether the worker's thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker to stop and return why it stopped.
    pub fn join(self) -> Result<Outcome> {
        self.thread
            .join()
            .map_err(|payload| Error::WorkerPanicked(trap::panic_message(payload.as_ref())))
    }
}
