use std::fmt;
use std::path::{Path, PathBuf};

/// What a single reformat invocation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReformatScope {
    WholeProject,
    SingleFile(PathBuf),
}

impl ReformatScope {
    pub fn file(&self) -> Option<&Path> {
        match self {
            ReformatScope::WholeProject => None,
            ReformatScope::SingleFile(path) => Some(path),
        }
    }
}

impl fmt::Display for ReformatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReformatScope::WholeProject => f.write_str("whole project"),
            ReformatScope::SingleFile(path) => write!(f, "file {}", path.display()),
        }
    }
}
