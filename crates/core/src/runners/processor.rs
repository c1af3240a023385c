//! Reformat one target: detect, gate, build, launch

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Built, Invocation, TaskHandle, TaskRunner};
use crate::{
    build_system::{BuildToolDetector, BuildToolKind, DefaultBuildToolDetector, VersionGate},
    error::{Error, Result},
    interfaces::{FileSystem, Notification, NotificationSink, VersionResolver},
    types::ReformatScope,
};

/// Collaborators shared by every processor of one run.
#[derive(Clone)]
pub struct ApplierContext {
    pub fs: Arc<dyn FileSystem>,
    pub versions: Arc<dyn VersionResolver>,
    pub notifier: Arc<dyn NotificationSink>,
    pub runner: TaskRunner,
}

pub struct ReformatProcessor<'a> {
    context: &'a ApplierContext,
    base_path: PathBuf,
    scope: ReformatScope,
}

impl<'a> ReformatProcessor<'a> {
    pub fn new(context: &'a ApplierContext, base_path: impl Into<PathBuf>, scope: ReformatScope) -> Self {
        Self {
            context,
            base_path: base_path.into(),
            scope,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Build the invocation without launching it.
    pub fn prepare(&self) -> Result<Invocation<Built>> {
        let tool = DefaultBuildToolDetector::detect_path(self.context.fs.as_ref(), &self.base_path);

        let no_config_cache = match tool {
            BuildToolKind::Gradle => {
                VersionGate::evaluate(self.context.versions.as_ref(), &self.base_path)
            }
            BuildToolKind::Maven => false,
            BuildToolKind::Unknown => {
                return Err(Error::UnresolvedBuildTool(self.base_path.clone()));
            }
        };

        Invocation::new().build(&self.base_path, &self.scope, tool, no_config_cache)
    }

    /// Launch the task. Returns `None` when nothing was launched; the reason
    /// has already been surfaced through the notification sink.
    pub fn run(&self) -> Option<TaskHandle> {
        match self.prepare() {
            Ok(invocation) => {
                tracing::info!(
                    "Reformatting {} in {}",
                    self.scope,
                    self.base_path.display()
                );
                Some(invocation.start(&self.context.runner))
            }
            Err(e) => {
                tracing::error!("Not launching reformat for {}: {}", self.base_path.display(), e);
                let message = match e {
                    Error::UnresolvedBuildTool(_) => "Unable to resolve build tool".to_string(),
                    other => other.to_string(),
                };
                self.context.notifier.notify(Notification::error(message));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_system::ToolVersion,
        command::TaskInvocationSpec,
        interfaces::TaskLauncher,
        services::DiskFileSystem,
    };
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct NeverLauncher;

    #[async_trait]
    impl TaskLauncher for NeverLauncher {
        async fn launch(&self, _spec: &TaskInvocationSpec) -> Result<bool> {
            Ok(true)
        }
    }

    struct Versions(Option<&'static str>);

    impl VersionResolver for Versions {
        fn resolve_version(&self, _project_path: &Path) -> Result<ToolVersion> {
            self.0
                .map(ToolVersion::parse)
                .unwrap_or_else(|| Err(Error::UnresolvedVersion("unreadable".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<Notification>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn context(version: Option<&'static str>, sink: Arc<RecordingSink>) -> ApplierContext {
        ApplierContext {
            fs: Arc::new(DiskFileSystem),
            versions: Arc::new(Versions(version)),
            notifier: sink.clone(),
            runner: TaskRunner::new(Arc::new(NeverLauncher), sink),
        }
    }

    #[test]
    fn test_prepare_gradle_with_new_version() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("build.gradle"), "").unwrap();
        let ctx = context(Some("8.5"), Arc::new(RecordingSink::default()));

        let spec = ReformatProcessor::new(&ctx, temp_dir.path(), ReformatScope::WholeProject)
            .prepare()
            .unwrap()
            .into_spec();

        assert_eq!(spec.task_names, vec!["spotlessApply"]);
        assert_eq!(spec.parameters, "--no-configuration-cache");
    }

    #[test]
    fn test_prepare_gradle_with_unreadable_version() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("settings.gradle"), "").unwrap();
        let ctx = context(None, Arc::new(RecordingSink::default()));
        let file = temp_dir.path().join("src/Foo.java");

        let spec = ReformatProcessor::new(&ctx, temp_dir.path(), ReformatScope::SingleFile(file.clone()))
            .prepare()
            .unwrap()
            .into_spec();

        assert_eq!(spec.parameters, format!("-PspotlessIdeHook=\"{}\"", file.display()));
    }

    #[test]
    fn test_prepare_maven_ignores_version() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "").unwrap();
        let ctx = context(Some("9.0"), Arc::new(RecordingSink::default()));

        let spec = ReformatProcessor::new(&ctx, temp_dir.path(), ReformatScope::WholeProject)
            .prepare()
            .unwrap()
            .into_spec();

        assert_eq!(spec.task_names, vec!["spotless:apply"]);
        assert_eq!(spec.parameters, "");
    }

    #[test]
    fn test_run_without_build_tool_notifies_and_launches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(RecordingSink::default());
        let ctx = context(Some("8.5"), sink.clone());

        let handle = ReformatProcessor::new(&ctx, temp_dir.path(), ReformatScope::WholeProject).run();

        assert!(handle.is_none());
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            &[Notification::error("Unable to resolve build tool")]
        );
    }
}
