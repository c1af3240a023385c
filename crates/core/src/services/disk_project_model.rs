//! Module discovery by walking the project directory

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::DiskFileSystem;
use crate::{
    build_system::{BuildToolDetector, BuildToolKind, DefaultBuildToolDetector},
    config::DiscoveryConfig,
    error::Result,
    interfaces::{FileSystem, ProjectModel, ProjectModule},
};

/// Project model built from the directory tree under a base path.
///
/// Every directory holding a build marker is a module. Gradle modules also
/// report one module per `src/<set>` directory, linked back to the owning
/// project the way IDE Gradle imports expose source sets.
pub struct DiskProjectModel {
    base_path: PathBuf,
    modules: Vec<ProjectModule>,
}

impl DiskProjectModel {
    pub fn discover(base_path: &Path, discovery: &DiscoveryConfig) -> Result<Self> {
        let base_path = base_path.canonicalize()?;

        let mut found = Vec::new();
        for entry in WalkDir::new(&base_path)
            .max_depth(discovery.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !discovery.is_excluded(&e.file_name().to_string_lossy())
            })
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_dir() {
                continue;
            }

            let kind = DefaultBuildToolDetector::detect_path(&DiskFileSystem, entry.path());
            if kind.is_known() {
                found.push((entry.into_path(), kind));
            }
        }

        let mut names = ModuleNames::default();
        let relative_names: Vec<Option<String>> = found
            .iter()
            .map(|(dir, _)| relative_name(&base_path, dir))
            .collect();
        let base_name = root_name(&base_path, &relative_names);

        let mut modules = Vec::new();
        for ((dir, kind), relative) in found.iter().zip(relative_names) {
            let name = names.claim(relative.unwrap_or_else(|| base_name.clone()));
            tracing::debug!("Discovered {} module '{}' at {}", kind, name, dir.display());

            modules.push(directory_module(&name, dir, *kind));
            if *kind == BuildToolKind::Gradle {
                modules.extend(source_set_modules(&name, dir, &mut names));
            }
        }

        Ok(Self { base_path, modules })
    }

    pub fn from_modules(base_path: impl Into<PathBuf>, modules: Vec<ProjectModule>) -> Self {
        Self {
            base_path: base_path.into(),
            modules,
        }
    }
}

impl ProjectModel for DiskProjectModel {
    fn base_path(&self) -> Option<&Path> {
        Some(&self.base_path)
    }

    fn modules(&self) -> Vec<ProjectModule> {
        self.modules.clone()
    }
}

fn directory_module(name: &str, dir: &Path, kind: BuildToolKind) -> ProjectModule {
    ProjectModule::new(name, dir)
        .with_declared_tool(kind)
        .with_linked_project_path(dir)
}

/// `:`-joined path relative to the base; `None` for the base itself.
fn relative_name(base_path: &Path, dir: &Path) -> Option<String> {
    let rel = dir.strip_prefix(base_path).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":"),
    )
}

/// The base directory's own name, or Gradle's root project path `:` when a
/// nested module already uses that name.
fn root_name(base_path: &Path, relative_names: &[Option<String>]) -> String {
    let dir_name = base_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ":".to_string());

    if relative_names.iter().flatten().any(|name| *name == dir_name) {
        ":".to_string()
    } else {
        dir_name
    }
}

/// Names handed out so far. Module names are unique within a project.
#[derive(Default)]
struct ModuleNames {
    taken: HashSet<String>,
}

impl ModuleNames {
    /// `name`, or `name#2`, `name#3`, ... when it is already taken.
    fn claim(&mut self, name: String) -> String {
        if self.taken.insert(name.clone()) {
            return name;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}#{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn source_set_modules(
    owner_name: &str,
    owner_dir: &Path,
    names: &mut ModuleNames,
) -> Vec<ProjectModule> {
    let src = owner_dir.join("src");
    let Ok(sets) = DiskFileSystem.children(&src) else {
        return Vec::new();
    };

    sets.into_iter()
        .map(|set| (src.join(&set), set))
        .filter(|(path, _)| path.is_dir())
        .map(|(path, set)| {
            ProjectModule::new(names.claim(format!("{owner_name}.{set}")), path)
                .with_declared_tool(BuildToolKind::Gradle)
                .with_linked_project_path(owner_dir)
        })
        .collect()
}
