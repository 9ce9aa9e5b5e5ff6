//! millrace - a thread-based FIFO task dispatcher
//!
//! One shared queue, any number of producers, any number of workers.
//! Producers submit closures and keep a handle to the eventual result;
//! workers drain the queue in strict submission order until it is sealed,
//! either gracefully (finish: drain dry, then stop) or immediately
//! (interrupt: stop at the next task boundary, abandoning the rest).
//!
//! # Quick Start
//!
//! ```
//! use millrace::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//!
//! let answer = dispatcher.submit(|| 6 * 7);
//! dispatcher.finish();
//!
//! // Drain the queue on this thread until the seal is reached.
//! assert_eq!(dispatcher.run(), Outcome::Finished);
//! assert_eq!(answer.join().unwrap(), 42);
//! ```
//!
//! # Features
//!
//! - **Strict FIFO**: one queue, global submission order, no priorities
//! - **Write-once handles**: every task's outcome, readable exactly once
//! - **Worker pools**: drain on the calling thread or on spawned workers
//! - **Two-phase shutdown**: graceful drain or immediate interruption
//! - **Trapped panics**: a panicking task fails its own handle, never the loop
//! - **Counters**: submissions, executions, panics, queue-wait percentiles

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

// Core modules - always available
pub mod config;
pub mod dispatch;
pub mod error;
pub mod prelude;
pub mod stats;
pub mod wordgrid;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use dispatch::{Dispatcher, Outcome, TaskHandle, TaskId, WorkerHandle, WorkerId};
pub use error::{Error, Result};
pub use stats::StatsSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_finish_run_join() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.submit(|| 1 + 1);

        dispatcher.finish();
        assert_eq!(dispatcher.run(), Outcome::Finished);
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[test]
    fn test_spawned_worker_drains_the_queue() {
        let dispatcher = Dispatcher::new();
        let worker = dispatcher.spawn_worker().unwrap();

        let handle = dispatcher.submit(|| "hi");
        dispatcher.finish();

        assert_eq!(handle.join().unwrap(), "hi");
        assert_eq!(worker.join().unwrap(), Outcome::Finished);
    }

    #[test]
    fn test_interrupt_stops_before_queued_work() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.submit(|| ());

        dispatcher.interrupt();
        assert_eq!(dispatcher.run(), Outcome::Interrupted);
        assert!(!handle.is_ready());
    }
}
