//! Service implementations for the host interfaces
//!
//! Filesystem and process backed implementations used by the CLI.

pub mod disk_file_system;
pub mod disk_project_model;
pub mod process_launcher;
pub mod wrapper_version_resolver;

pub use disk_file_system::DiskFileSystem;
pub use disk_project_model::DiskProjectModel;
pub use process_launcher::ProcessLauncher;
pub use wrapper_version_resolver::GradleWrapperVersionResolver;
