//! The shared FIFO and its terminal flag.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::dispatch::task::Task;
use crate::stats::Stats;

/// Why a drain loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The queue was sealed for graceful shutdown and drained dry.
    Finished,
    /// The queue was interrupted; remaining tasks were abandoned.
    Interrupted,
}

/// What a worker does next.
#[derive(Debug)]
pub(crate) enum Step {
    Execute(Task),
    Stop(Outcome),
}

/// Pending tasks plus the terminal flag, guarded by a single mutex.
///
/// All coordination between producers and workers runs through here:
/// producers push, workers block in `next_step`, and sealing the queue
/// broadcasts the stop signal.
#[derive(Debug)]
pub(crate) struct TaskQueue {
    state: Mutex<QueueState>,
    work_ready: Condvar,
    stats: Arc<Stats>,
}

#[derive(Debug)]
struct QueueState {
    pending: VecDeque<Task>,
    terminal: Option<Outcome>,
}

impl TaskQueue {
    pub(crate) fn new(stats: Arc<Stats>) -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                terminal: None,
            }),
            work_ready: Condvar::new(),
            stats,
        }
    }

    /// Append a task. Legal at any time, even after the queue is sealed;
    /// a task pushed after interruption will never run.
    pub(crate) fn push(&self, task: Task) {
        let mut state = self.state.lock();
        state.pending.push_back(task);
        // one new task, so one woken worker is enough
        self.work_ready.notify_one();
    }

    /// Seal the queue. The first seal fixes the outcome; later calls of
    /// either kind are no-ops. Every blocked worker is woken to observe
    /// the flag.
    pub(crate) fn seal(&self, outcome: Outcome) {
        let mut state = self.state.lock();
        if state.terminal.is_none() {
            state.terminal = Some(outcome);
        }
        self.work_ready.notify_all();
    }

    /// Block until there is something for the caller to do.
    ///
    /// Interruption outranks pending work, so a sealed-interrupted queue
    /// stops the caller even with tasks still queued. A finish seal only
    /// stops the caller once the queue has drained dry.
    pub(crate) fn next_step(&self) -> Step {
        let mut state = self.state.lock();
        loop {
            if state.terminal == Some(Outcome::Interrupted) {
                return Step::Stop(Outcome::Interrupted);
            }
            if let Some(task) = state.pending.pop_front() {
                // the task runs outside the lock
                return Step::Execute(task);
            }
            if state.terminal == Some(Outcome::Finished) {
                return Step::Stop(Outcome::Finished);
            }
            self.work_ready.wait(&mut state);
        }
    }

    pub(crate) fn pending_tasks(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        // Dropping the queued tasks orphans their handles.
        let leftover = self.state.get_mut().pending.len();
        if leftover > 0 {
            self.stats.record_abandoned(leftover as u64);
            tracing::warn!(tasks = leftover, "queue dropped with unexecuted tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn queue() -> Arc<TaskQueue> {
        Arc::new(TaskQueue::new(Arc::new(Stats::new())))
    }

    fn noop_task(stats: &Arc<Stats>) -> Task {
        let (task, _handle) = Task::wrap(|| (), stats.clone());
        task
    }

    #[test]
    fn test_tasks_come_out_in_push_order() {
        let queue = queue();
        let stats = Arc::new(Stats::new());

        let mut pushed = Vec::new();
        for _ in 0..3 {
            let task = noop_task(&stats);
            pushed.push(task.id);
            queue.push(task);
        }

        for expected in pushed {
            match queue.next_step() {
                Step::Execute(task) => assert_eq!(task.id, expected),
                Step::Stop(outcome) => panic!("unexpected stop: {:?}", outcome),
            }
        }
    }

    #[test]
    fn test_interruption_outranks_pending_work() {
        let queue = queue();
        let stats = Arc::new(Stats::new());

        queue.push(noop_task(&stats));
        queue.seal(Outcome::Interrupted);

        assert!(matches!(
            queue.next_step(),
            Step::Stop(Outcome::Interrupted)
        ));
        assert_eq!(queue.pending_tasks(), 1);
    }

    #[test]
    fn test_finish_drains_before_stopping() {
        let queue = queue();
        let stats = Arc::new(Stats::new());

        queue.push(noop_task(&stats));
        queue.push(noop_task(&stats));
        queue.seal(Outcome::Finished);

        assert!(matches!(queue.next_step(), Step::Execute(_)));
        assert!(matches!(queue.next_step(), Step::Execute(_)));
        assert!(matches!(queue.next_step(), Step::Stop(Outcome::Finished)));
    }

    #[test]
    fn test_first_seal_wins() {
        let finished_first = queue();
        finished_first.seal(Outcome::Finished);
        finished_first.seal(Outcome::Interrupted);
        assert!(matches!(
            finished_first.next_step(),
            Step::Stop(Outcome::Finished)
        ));

        let interrupted_first = queue();
        interrupted_first.seal(Outcome::Interrupted);
        interrupted_first.seal(Outcome::Finished);
        assert!(matches!(
            interrupted_first.next_step(),
            Step::Stop(Outcome::Interrupted)
        ));
    }

    #[test]
    fn test_blocked_caller_wakes_on_push() {
        let queue = queue();
        let stats = Arc::new(Stats::new());

        let waiter = {
            let queue = queue.clone();
            thread::spawn(move || match queue.next_step() {
                Step::Execute(task) => task.run(),
                Step::Stop(outcome) => panic!("unexpected stop: {:?}", outcome),
            })
        };

        thread::sleep(Duration::from_millis(20));
        queue.push(noop_task(&stats));
        waiter.join().unwrap();
    }

    #[test]
    fn test_seal_wakes_every_blocked_caller() {
        let queue = queue();

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || match queue.next_step() {
                    Step::Stop(outcome) => outcome,
                    Step::Execute(task) => panic!("unexpected task: {:?}", task),
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        queue.seal(Outcome::Finished);

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), Outcome::Finished);
        }
    }

    #[test]
    fn test_dropping_the_queue_counts_abandoned_tasks() {
        let stats = Arc::new(Stats::new());
        let queue = TaskQueue::new(stats.clone());

        let (task, handle) = Task::wrap(|| 9, stats.clone());
        queue.push(task);
        drop(queue);

        assert_eq!(stats.snapshot().tasks_abandoned, 1);
        assert!(matches!(
            handle.join(),
            Err(crate::error::Error::TaskAbandoned)
        ));
    }
}
