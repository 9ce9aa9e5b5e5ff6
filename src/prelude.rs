pub use crate::config::{Config, ConfigBuilder};
pub use crate::dispatch::{Dispatcher, Outcome, TaskHandle, TaskId, WorkerHandle, WorkerId};
pub use crate::error::{Error, Result};
pub use crate::stats::StatsSnapshot;
