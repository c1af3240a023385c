//! Core interfaces for the host collaborators
//!
//! Everything the core needs from its host (directory listings, the module
//! model, tool versions, process execution, user selection and
//! notifications) is reached through these traits so the resolution and
//! orchestration logic runs without any host runtime.

pub mod file_system;
pub mod module_selector;
pub mod notification;
pub mod project_model;
pub mod task_launcher;
pub mod version_resolver;

pub use file_system::FileSystem;
pub use module_selector::{ModuleSelector, SelectionResponse};
pub use notification::{Notification, NotificationLevel, NotificationSink};
pub use project_model::{ProjectModel, ProjectModule};
pub use task_launcher::TaskLauncher;
pub use version_resolver::VersionResolver;
