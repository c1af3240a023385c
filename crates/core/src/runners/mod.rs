//! Task execution: per-invocation state, the async runner and the
//! per-target reformat processor

pub mod invocation;
pub mod processor;
pub mod task_runner;

pub use invocation::{Built, Idle, Invocation, TaskState};
pub use processor::{ApplierContext, ReformatProcessor};
pub use task_runner::{TaskHandle, TaskOutcome, TaskRunner};
