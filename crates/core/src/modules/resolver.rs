//! Resolve the independently buildable modules of a project

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::{
    build_system::{BuildToolDetector, BuildToolKind, DefaultBuildToolDetector},
    interfaces::{FileSystem, ProjectModule},
    types::ModuleInfo,
};

/// Resolved modules keyed by name, in first-encountered order.
pub type ResolvedModules = IndexMap<String, ModuleInfo>;

pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Classify every module and key the survivors by canonical name.
    ///
    /// Modules with no detectable build tool or root path are dropped. When
    /// two modules resolve to the same name the first one is kept.
    pub fn resolve(&self, modules: &[ProjectModule], base_path: Option<&Path>) -> ResolvedModules {
        let mut resolved = ResolvedModules::new();

        for module in modules {
            let Some(info) = self.build_module_info(modules, module, base_path) else {
                continue;
            };

            if resolved.contains_key(&info.name) {
                tracing::debug!(
                    "Module '{}' already resolved, dropping duplicate from '{}'",
                    info.name,
                    module.name
                );
                continue;
            }
            resolved.insert(info.name.clone(), info);
        }

        resolved
    }

    fn build_module_info(
        &self,
        modules: &[ProjectModule],
        module: &ProjectModule,
        base_path: Option<&Path>,
    ) -> Option<ModuleInfo> {
        let kind = self.resolve_kind(module);
        if !kind.is_known() {
            tracing::debug!("Skipping module '{}': unknown build tool", module.name);
            return None;
        }

        let Some(module_path) = Self::module_path(module, kind) else {
            tracing::debug!("Skipping module '{}': no module path", module.name);
            return None;
        };

        let owner = match kind {
            BuildToolKind::Maven => module,
            // Gradle reports source sets as modules of their own; the real
            // module is the one owning the linked project directory
            BuildToolKind::Gradle => match Self::find_owner(modules, &module_path) {
                Some(owner) => owner,
                None => {
                    tracing::debug!(
                        "Skipping module '{}': no module owns {}",
                        module.name,
                        module_path.display()
                    );
                    return None;
                }
            },
            BuildToolKind::Unknown => return None,
        };

        let is_root_module = base_path.is_some_and(|base| module_path == base);

        Some(ModuleInfo {
            name: owner.name.clone(),
            root_path: module_path,
            kind,
            is_root_module,
        })
    }

    fn resolve_kind(&self, module: &ProjectModule) -> BuildToolKind {
        match module.declared_tool {
            Some(kind) if kind.is_known() => kind,
            _ => module
                .content_root
                .as_deref()
                .map(|root| DefaultBuildToolDetector::detect_path(self.fs, root))
                .unwrap_or(BuildToolKind::Unknown),
        }
    }

    fn module_path(module: &ProjectModule, kind: BuildToolKind) -> Option<PathBuf> {
        match kind {
            BuildToolKind::Maven => module.content_root.clone(),
            BuildToolKind::Gradle => module
                .linked_project_path
                .clone()
                .or_else(|| module.content_root.clone()),
            BuildToolKind::Unknown => None,
        }
    }

    /// The module whose content root is the nearest ancestor of `path`.
    fn find_owner<'m>(modules: &'m [ProjectModule], path: &Path) -> Option<&'m ProjectModule> {
        path.ancestors().find_map(|dir| {
            modules
                .iter()
                .find(|m| m.content_root.as_deref() == Some(dir))
        })
    }
}
