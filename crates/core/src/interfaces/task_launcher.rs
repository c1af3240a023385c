//! External task execution interface

use async_trait::async_trait;

use crate::{command::TaskInvocationSpec, error::Result};

/// Trait for the host's task-execution subsystem
#[async_trait]
pub trait TaskLauncher: Send + Sync {
    /// Execute `spec` to completion.
    ///
    /// Returns whether the task terminated successfully. `Err` means the task
    /// could not be launched at all.
    async fn launch(&self, spec: &TaskInvocationSpec) -> Result<bool>;
}
