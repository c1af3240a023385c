//! Configuration management for spotless-applier

mod settings;
pub mod tools;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, Config};
pub use tools::{DiscoveryConfig, GradleConfig, MavenConfig};
