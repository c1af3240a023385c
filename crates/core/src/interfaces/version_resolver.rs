use std::path::Path;

use crate::{build_system::ToolVersion, error::Result};

/// Trait for resolving the build tool version linked to a project path
pub trait VersionResolver: Send + Sync {
    /// Fails with `Error::UnresolvedVersion` when the linked settings cannot
    /// be read.
    fn resolve_version(&self, project_path: &Path) -> Result<ToolVersion>;
}
