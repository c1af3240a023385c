//! Directory listing interface

use std::io;
use std::path::Path;

/// Trait for the directory child-listing primitive
pub trait FileSystem: Send + Sync {
    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the direct children of `path`, in a stable order
    fn children(&self, path: &Path) -> io::Result<Vec<String>>;
}
