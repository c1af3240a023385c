use serde::Serialize;
use std::path::PathBuf;

use crate::build_system::BuildToolKind;

/// A module that can be reformatted on its own.
///
/// `kind` is never `Unknown`: the resolver drops such modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub root_path: PathBuf,
    pub kind: BuildToolKind,
    pub is_root_module: bool,
}
