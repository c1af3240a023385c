//! Host-side collaborators handed to the core

pub mod notifier;
pub mod project;
pub mod selector;

pub use notifier::ConsoleNotifier;
pub use project::ProjectContext;
pub use selector::{FlagSelector, PromptSelector};
