//! Task execution through the Gradle/Maven executables

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::{
    build_system::BuildToolKind,
    command::TaskInvocationSpec,
    config::Config,
    error::{Error, Result},
    interfaces::TaskLauncher,
};

/// Launches the spotless task as a child process of the current one.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    config: Config,
}

impl ProcessLauncher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Program and argv for `spec`, in launch order.
    pub fn command_line(&self, spec: &TaskInvocationSpec) -> Result<(String, Vec<String>)> {
        let (program, extra_args) = match spec.tool {
            BuildToolKind::Gradle => (
                self.config
                    .gradle
                    .command
                    .clone()
                    .unwrap_or_else(|| find_wrapper(spec.working_dir(), gradle_wrapper(), "gradle")),
                &self.config.gradle.extra_args,
            ),
            BuildToolKind::Maven => (
                self.config
                    .maven
                    .command
                    .clone()
                    .unwrap_or_else(|| find_wrapper(spec.working_dir(), maven_wrapper(), "mvn")),
                &self.config.maven.extra_args,
            ),
            BuildToolKind::Unknown => {
                return Err(Error::UnresolvedBuildTool(spec.working_dir.clone()));
            }
        };

        let mut args = spec.task_names.clone();
        args.extend(spec.parameter_args()?);
        args.extend(extra_args.iter().cloned());

        Ok((program, args))
    }
}

#[async_trait]
impl TaskLauncher for ProcessLauncher {
    async fn launch(&self, spec: &TaskInvocationSpec) -> Result<bool> {
        let (program, args) = self.command_line(spec)?;
        tracing::info!(
            "Running: {} {} (in {})",
            program,
            args.join(" "),
            spec.working_dir.display()
        );

        let status = Command::new(&program)
            .args(&args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| Error::Launch(format!("{program}: {e}")))?;

        tracing::debug!("{} exited with {}", program, status);
        Ok(status.success())
    }
}

fn gradle_wrapper() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "gradlew" }
}

fn maven_wrapper() -> &'static str {
    if cfg!(windows) { "mvnw.cmd" } else { "mvnw" }
}

/// Nearest wrapper script at or above `working_dir`, else `fallback`.
fn find_wrapper(working_dir: &Path, wrapper: &str, fallback: &str) -> String {
    working_dir
        .ancestors()
        .map(|dir| dir.join(wrapper))
        .find(|candidate| candidate.is_file())
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}
