use anyhow::{Context, Result};
use spotless_applier_core::{
    Config, SpotlessApplier,
    interfaces::{ModuleSelector, NotificationSink},
    services::{DiskProjectModel, GradleWrapperVersionResolver, ProcessLauncher},
};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::ProjectArgs;

/// Project root, its configuration and discovered modules.
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: Config,
    pub model: Arc<DiskProjectModel>,
}

impl ProjectContext {
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = match args.project {
            Some(ref dir) => dir.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize project root {}", root.display()))?;

        let config = Config::load_for(&root)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;

        let model = DiskProjectModel::discover(&root, &config.discovery)
            .with_context(|| format!("Failed to discover modules under {}", root.display()))?;

        Ok(Self {
            root,
            config,
            model: Arc::new(model),
        })
    }

    pub fn launcher(&self) -> Arc<ProcessLauncher> {
        Arc::new(ProcessLauncher::new(self.config.clone()))
    }

    pub fn applier(
        &self,
        notifier: Arc<dyn NotificationSink>,
        selector: Box<dyn ModuleSelector>,
    ) -> SpotlessApplier {
        SpotlessApplier::new(self.model.clone(), self.launcher(), notifier, selector)
            .with_version_resolver(Arc::new(GradleWrapperVersionResolver::new(
                self.config.gradle.version.clone(),
            )))
    }

    /// Make `file` absolute against the current directory.
    pub fn absolute_file(file: &Path) -> Result<PathBuf> {
        if file.is_absolute() {
            return Ok(file.to_path_buf());
        }
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let joined = cwd.join(file);
        Ok(joined.canonicalize().unwrap_or(joined))
    }
}
