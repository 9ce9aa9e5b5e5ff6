//! Task dispatch infrastructure.
//!
//! This module provides the shared FIFO queue, the handles observing
//! submitted tasks, and the worker loop that drains the queue.

pub mod dispatcher;
pub mod handle;
pub mod queue;
pub mod task;
pub mod worker;

pub(crate) mod trap;

pub use dispatcher::Dispatcher;
pub use handle::TaskHandle;
pub use queue::Outcome;
pub use task::TaskId;
pub use worker::{WorkerHandle, WorkerId};
