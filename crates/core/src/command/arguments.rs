//! Tool-specific argument construction for the spotless task

use std::path::Path;

use super::{GRADLE_SPOTLESS_TASK, MAVEN_SPOTLESS_GOAL, TaskInvocationSpec};
use crate::{
    build_system::{BuildToolKind, version::NO_CONFIGURATION_CACHE_FLAG},
    error::{Error, Result},
    types::ReformatScope,
};

/// Gradle project property read by the Spotless IDE hook.
pub const GRADLE_IDE_HOOK_PROPERTY: &str = "spotlessIdeHook";

/// Maven user property that restricts Spotless to matching files.
pub const MAVEN_FILES_PROPERTY: &str = "spotlessFiles";

pub struct TaskArgumentBuilder;

impl TaskArgumentBuilder {
    /// Compose the invocation for `scope` with the detected `tool`.
    ///
    /// `no_config_cache` is the version gate's verdict and only affects
    /// Gradle.
    pub fn build(
        working_dir: &Path,
        scope: &ReformatScope,
        tool: BuildToolKind,
        no_config_cache: bool,
    ) -> Result<TaskInvocationSpec> {
        let (task, parameters) = match tool {
            BuildToolKind::Gradle => (
                GRADLE_SPOTLESS_TASK,
                Self::gradle_script_parameters(scope, no_config_cache),
            ),
            BuildToolKind::Maven => (MAVEN_SPOTLESS_GOAL, Self::maven_vm_options(scope)),
            BuildToolKind::Unknown => {
                return Err(Error::UnresolvedBuildTool(working_dir.to_path_buf()));
            }
        };

        tracing::debug!(
            "Built {} invocation for {} in {}: {} {}",
            tool,
            scope,
            working_dir.display(),
            task,
            parameters
        );

        Ok(TaskInvocationSpec {
            working_dir: working_dir.to_path_buf(),
            tool,
            task_names: vec![task.to_string()],
            parameters,
        })
    }

    pub fn gradle_script_parameters(scope: &ReformatScope, no_config_cache: bool) -> String {
        let mut parts = Vec::with_capacity(2);

        if let Some(file) = scope.file() {
            parts.push(format!(
                "-P{}={}",
                GRADLE_IDE_HOOK_PROPERTY,
                quote(&file.to_string_lossy())
            ));
        }

        if no_config_cache {
            parts.push(NO_CONFIGURATION_CACHE_FLAG.to_string());
        }

        parts.join(" ")
    }

    pub fn maven_vm_options(scope: &ReformatScope) -> String {
        match scope.file() {
            Some(file) => format!(
                "-D{}={}",
                MAVEN_FILES_PROPERTY,
                quote(&Self::encode_maven_file_pattern(&file.to_string_lossy()))
            ),
            None => String::new(),
        }
    }

    /// Dots are escaped first, then every `/` becomes `.`.
    pub fn encode_maven_file_pattern(path: &str) -> String {
        path.replace('.', "\\.").replace('/', ".")
    }
}

/// Wrap `value` in double quotes so POSIX word splitting gives it back
/// unchanged.
///
/// Only `"` and backslashes that would otherwise start an escape are
/// escaped, so ordinary paths and Maven's `\.` pass through verbatim.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' if matches!(chars.peek(), None | Some('"' | '\\' | '$' | '`' | '\n')) => {
                quoted.push_str("\\\\")
            }
            _ => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}
