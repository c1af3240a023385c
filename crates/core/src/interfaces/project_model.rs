//! Project module enumeration interface

use std::path::{Path, PathBuf};

use crate::build_system::BuildToolKind;

/// A module as the host reports it, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModule {
    /// Unique within the project
    pub name: String,
    /// Directory the module owns
    pub content_root: Option<PathBuf>,
    /// Build tool the host linked the module to, if any
    pub declared_tool: Option<BuildToolKind>,
    /// Path of the linked build-tool project. Gradle source-set modules
    /// point this at their owning project directory.
    pub linked_project_path: Option<PathBuf>,
}

impl ProjectModule {
    pub fn new(name: impl Into<String>, content_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            content_root: Some(content_root.into()),
            declared_tool: None,
            linked_project_path: None,
        }
    }

    pub fn with_declared_tool(mut self, tool: BuildToolKind) -> Self {
        self.declared_tool = Some(tool);
        self
    }

    pub fn with_linked_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.linked_project_path = Some(path.into());
        self
    }
}

/// Trait for the host's project/module model
pub trait ProjectModel: Send + Sync {
    /// Base path of the open project
    fn base_path(&self) -> Option<&Path>;

    /// Every module of the project, in the host's iteration order
    fn modules(&self) -> Vec<ProjectModule>;
}
