//! One-shot result slots pairing a submitted task with its observer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::dispatch::task::TaskId;
use crate::error::{Error, Result};

/// Write-once cell shared by a [`Promise`] and a [`TaskHandle`].
#[derive(Debug)]
struct Slot<T> {
    state: Mutex<SlotState<T>>,
    settled: Condvar,
}

#[derive(Debug)]
enum SlotState<T> {
    /// Nothing stored yet; the task is queued or running.
    Pending,
    /// The task ran to an outcome, successful or not.
    Ready(Result<T>),
    /// The task was dropped without ever running.
    Orphaned,
}

/// Create a connected promise/handle pair for one task.
pub(crate) fn slot_pair<T>(id: TaskId) -> (Promise<T>, TaskHandle<T>) {
    let slot = Arc::new(Slot {
        state: Mutex::new(SlotState::Pending),
        settled: Condvar::new(),
    });

    (
        Promise {
            slot: Some(slot.clone()),
        },
        TaskHandle { id, slot },
    )
}

/// Write side of a slot. Travels inside the queued task; consumed on
/// fulfillment, orphaning the slot if dropped first.
pub(crate) struct Promise<T> {
    slot: Option<Arc<Slot<T>>>,
}

impl<T> Promise<T> {
    /// Store the outcome and wake every blocked observer.
    pub(crate) fn fulfill(mut self, outcome: Result<T>) {
        if let Some(slot) = self.slot.take() {
            let mut state = slot.state.lock();
            *state = SlotState::Ready(outcome);
            slot.settled.notify_all();
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        // A promise dropped unfulfilled means its task will never run.
        // Observers blocked on the slot must not hang forever.
        if let Some(slot) = self.slot.take() {
            let mut state = slot.state.lock();
            if matches!(*state, SlotState::Pending) {
                *state = SlotState::Orphaned;
                slot.settled.notify_all();
            }
        }
    }
}

/// Observer for one submitted task.
///
/// The handle outlives the dispatcher that produced it: once the task has
/// run, its outcome stays readable here regardless of what happens to the
/// queue. There is exactly one handle per task; share it by reference and
/// call [`join`](TaskHandle::join) from the final owner.
#[derive(Debug)]
pub struct TaskHandle<T> {
    id: TaskId,
    slot: Arc<Slot<T>>,
}

impl<T> TaskHandle<T> {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// True once the task has run and stored its outcome.
    ///
    /// A task abandoned in the queue never becomes ready.
    pub fn is_ready(&self) -> bool {
        matches!(*self.slot.state.lock(), SlotState::Ready(_))
    }

    /// Block until the slot settles, through fulfillment or abandonment.
    ///
    /// Blocks forever if the task sits unexecuted in a live queue.
    pub fn wait(&self) {
        let mut state = self.slot.state.lock();
        while matches!(*state, SlotState::Pending) {
            self.slot.settled.wait(&mut state);
        }
    }

    /// Bounded [`wait`](TaskHandle::wait): true if the slot settled in time.
    ///
    /// A zero timeout is a non-blocking poll; a timeout too large to
    /// represent as a deadline waits without bound.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        // A deadline past the end of Instant's range means no deadline.
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait();
                return true;
            }
        };

        let mut state = self.slot.state.lock();
        while matches!(*state, SlotState::Pending) {
            if self.slot.settled.wait_until(&mut state, deadline).timed_out() {
                return !matches!(*state, SlotState::Pending);
            }
        }
        true
    }

    /// Block until the task settles and take its outcome.
    ///
    /// Yields the task's value, the failure captured from its panic, or
    /// [`Error::TaskAbandoned`] if the task was dropped without running.
    pub fn join(self) -> Result<T> {
        let mut state = self.slot.state.lock();
        while matches!(*state, SlotState::Pending) {
            self.slot.settled.wait(&mut state);
        }

        match std::mem::replace(&mut *state, SlotState::Orphaned) {
            SlotState::Ready(outcome) => outcome,
            _ => Err(Error::TaskAbandoned),
        }
    }
}
