//! Module resolution and selection

pub mod resolver;
pub mod selection;

pub use resolver::{ModuleResolver, ResolvedModules};
pub use selection::SelectionCoordinator;
