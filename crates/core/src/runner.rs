//! Entry point that turns a reformat request into launched tasks

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    command::TaskInvocationSpec,
    error::Result,
    interfaces::{
        FileSystem, ModuleSelector, NotificationSink, ProjectModel, TaskLauncher, VersionResolver,
    },
    modules::{ModuleResolver, ResolvedModules, SelectionCoordinator},
    runners::{ApplierContext, ReformatProcessor, TaskHandle, TaskRunner},
    services::{DiskFileSystem, GradleWrapperVersionResolver},
    types::ReformatScope,
};

/// Reformats a project, its modules, or a single file with Spotless.
pub struct SpotlessApplier {
    project: Arc<dyn ProjectModel>,
    selector: Box<dyn ModuleSelector>,
    context: ApplierContext,
}

impl SpotlessApplier {
    pub fn new(
        project: Arc<dyn ProjectModel>,
        launcher: Arc<dyn TaskLauncher>,
        notifier: Arc<dyn NotificationSink>,
        selector: Box<dyn ModuleSelector>,
    ) -> Self {
        let runner = TaskRunner::new(launcher, Arc::clone(&notifier));
        Self {
            project,
            selector,
            context: ApplierContext {
                fs: Arc::new(DiskFileSystem),
                versions: Arc::new(GradleWrapperVersionResolver::default()),
                notifier,
                runner,
            },
        }
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.context.fs = fs;
        self
    }

    pub fn with_version_resolver(mut self, versions: Arc<dyn VersionResolver>) -> Self {
        self.context.versions = versions;
        self
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.project.base_path()
    }

    pub fn resolve_modules(&self) -> ResolvedModules {
        ModuleResolver::new(self.context.fs.as_ref())
            .resolve(&self.project.modules(), self.project.base_path())
    }

    /// Reformat `file`, or the selected modules when no file is given.
    ///
    /// Tasks are launched without waiting on each other; the returned
    /// handles may resolve in any order. An empty result means nothing was
    /// launched.
    pub fn run(&self, file: Option<PathBuf>) -> Vec<TaskHandle> {
        self.processors(file)
            .iter()
            .filter_map(|processor| processor.run())
            .collect()
    }

    /// The specs `run` would launch, without launching them.
    pub fn plan(&self, file: Option<PathBuf>) -> Result<Vec<TaskInvocationSpec>> {
        self.processors(file)
            .iter()
            .map(|processor| processor.prepare().map(|invocation| invocation.into_spec()))
            .collect()
    }

    fn processors(&self, file: Option<PathBuf>) -> Vec<ReformatProcessor<'_>> {
        match file {
            Some(file) => self
                .file_base_path(&file)
                .map(|base| {
                    ReformatProcessor::new(&self.context, base, ReformatScope::SingleFile(file))
                })
                .into_iter()
                .collect(),
            None => {
                let resolved = self.resolve_modules();
                tracing::debug!("Resolved {} module(s)", resolved.len());

                SelectionCoordinator::select(&resolved, self.selector.as_ref())
                    .into_iter()
                    .map(|module| {
                        ReformatProcessor::new(
                            &self.context,
                            module.root_path,
                            ReformatScope::WholeProject,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Root of the deepest resolved module containing `file`, else the
    /// project base path.
    fn file_base_path(&self, file: &Path) -> Option<PathBuf> {
        let owning_module = self
            .resolve_modules()
            .into_values()
            .filter(|module| file.starts_with(&module.root_path))
            .max_by_key(|module| module.root_path.components().count())
            .map(|module| module.root_path);

        owning_module.or_else(|| self.project.base_path().map(Path::to_path_buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_system::BuildToolKind,
        interfaces::{Notification, ProjectModule, SelectionResponse},
        services::DiskProjectModel,
    };
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    struct OkLauncher;

    #[async_trait]
    impl TaskLauncher for OkLauncher {
        async fn launch(&self, _spec: &TaskInvocationSpec) -> Result<bool> {
            Ok(true)
        }
    }

    struct Silent;

    impl NotificationSink for Silent {
        fn notify(&self, _notification: Notification) {}
    }

    struct PickAll;

    impl ModuleSelector for PickAll {
        fn select(&self, candidates: &[String], _has_root: bool) -> SelectionResponse {
            SelectionResponse::modules(candidates.to_vec())
        }
    }

    fn applier(project: DiskProjectModel) -> SpotlessApplier {
        SpotlessApplier::new(
            Arc::new(project),
            Arc::new(OkLauncher),
            Arc::new(Silent),
            Box::new(PickAll),
        )
    }

    #[test]
    fn test_plan_single_file_uses_owning_module() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let api = root.join("api");
        fs::create_dir_all(&api).unwrap();
        fs::write(root.join("pom.xml"), "").unwrap();
        fs::write(api.join("pom.xml"), "").unwrap();

        let project = DiskProjectModel::from_modules(
            root,
            vec![
                ProjectModule::new("root", root).with_declared_tool(BuildToolKind::Maven),
                ProjectModule::new("api", &api).with_declared_tool(BuildToolKind::Maven),
            ],
        );
        let file = api.join("src/main/java/Api.java");

        let specs = applier(project).plan(Some(file)).unwrap();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].working_dir, api);
        assert!(specs[0].parameters.starts_with("-DspotlessFiles=\""));
    }

    #[test]
    fn test_plan_whole_project_fans_out() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["a", "b"] {
            fs::create_dir_all(root.join(name)).unwrap();
            fs::write(root.join(name).join("build.gradle"), "").unwrap();
        }

        let project = DiskProjectModel::discover(root, &Default::default()).unwrap();
        let specs = applier(project).plan(None).unwrap();

        let dirs: Vec<_> = specs
            .iter()
            .map(|s| s.working_dir.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(dirs, vec!["a", "b"]);
    }

    #[test]
    fn test_plan_without_modules_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let project = DiskProjectModel::discover(temp_dir.path(), &Default::default()).unwrap();

        assert!(applier(project).plan(None).unwrap().is_empty());
    }
}
