//! Type-state pattern for a single reformat invocation

use std::fmt;
use std::path::Path;

use super::{TaskHandle, TaskRunner};
use crate::{
    build_system::BuildToolKind,
    command::{TaskArgumentBuilder, TaskInvocationSpec},
    error::Result,
    types::ReformatScope,
};

/// Lifecycle of one invocation. Terminal once `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Built,
    Running,
    Completed { success: bool },
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Idle => f.write_str("idle"),
            TaskState::Built => f.write_str("built"),
            TaskState::Running => f.write_str("running"),
            TaskState::Completed { success: true } => f.write_str("completed"),
            TaskState::Completed { success: false } => f.write_str("failed"),
        }
    }
}

/// Type state for an invocation with no spec yet
pub struct Idle;

/// Type state for an invocation holding its spec
pub struct Built(TaskInvocationSpec);

/// One reformat invocation. Starting it consumes it, so a spec is launched
/// at most once and a retry needs a fresh invocation.
pub struct Invocation<State = Idle> {
    state: State,
}

impl Invocation<Idle> {
    pub fn new() -> Self {
        Self { state: Idle }
    }

    pub fn state(&self) -> TaskState {
        TaskState::Idle
    }

    pub fn build(
        self,
        working_dir: &Path,
        scope: &ReformatScope,
        tool: BuildToolKind,
        no_config_cache: bool,
    ) -> Result<Invocation<Built>> {
        let spec = TaskArgumentBuilder::build(working_dir, scope, tool, no_config_cache)?;
        Ok(Invocation { state: Built(spec) })
    }
}

impl Default for Invocation<Idle> {
    fn default() -> Self {
        Self::new()
    }
}

impl Invocation<Built> {
    pub fn state(&self) -> TaskState {
        TaskState::Built
    }

    pub fn spec(&self) -> &TaskInvocationSpec {
        &self.state.0
    }

    pub fn into_spec(self) -> TaskInvocationSpec {
        self.state.0
    }

    /// Hand the spec to `runner`. The returned handle is the `Running` state.
    pub fn start(self, runner: &TaskRunner) -> TaskHandle {
        runner.run(self.state.0)
    }
}
