use std::io;
use std::path::PathBuf;

/// Errors that can occur during spotless-applier operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to resolve build tool at {}", .0.display())]
    UnresolvedBuildTool(PathBuf),

    #[error("Unable to resolve tool version: {0}")]
    UnresolvedVersion(String),

    #[error("External task failed: {0}")]
    ExternalTaskFailure(String),

    #[error("Failed to launch task: {0}")]
    Launch(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for spotless-applier operations
pub type Result<T> = std::result::Result<T, Error>;
