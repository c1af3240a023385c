use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::{
    build_system::BuildToolKind,
    error::{Error, Result},
};

/// Everything needed to launch one external spotless task.
///
/// Built fresh per invocation and consumed by the task runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskInvocationSpec {
    pub working_dir: PathBuf,
    pub tool: BuildToolKind,
    pub task_names: Vec<String>,
    /// Gradle script parameters or Maven VM options, in the encoding the
    /// tool expects
    pub parameters: String,
}

impl TaskInvocationSpec {
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Default executable name for the tool.
    pub fn program(&self) -> &'static str {
        match self.tool {
            BuildToolKind::Gradle => "gradle",
            BuildToolKind::Maven => "mvn",
            BuildToolKind::Unknown => "",
        }
    }

    /// Split `parameters` into argv entries using POSIX shell quoting.
    pub fn parameter_args(&self) -> Result<Vec<String>> {
        shlex::split(&self.parameters).ok_or_else(|| {
            Error::Launch(format!("Malformed task parameters: {}", self.parameters))
        })
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::from(self.program());
        for task in &self.task_names {
            cmd.push(' ');
            cmd.push_str(task);
        }
        if !self.parameters.is_empty() {
            cmd.push(' ');
            cmd.push_str(&self.parameters);
        }
        cmd
    }
}
