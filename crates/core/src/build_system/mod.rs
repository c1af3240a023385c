//! Build tool classification from marker files

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::interfaces::FileSystem;

pub mod version;

pub use version::{ToolVersion, VersionGate};

/// Marker files that identify a Gradle build.
pub const GRADLE_MARKERS: [&str; 4] = [
    "settings.gradle",
    "settings.gradle.kts",
    "build.gradle",
    "build.gradle.kts",
];

/// Marker file that identifies a Maven build.
pub const MAVEN_MARKER: &str = "pom.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildToolKind {
    Gradle,
    Maven,
    Unknown,
}

impl BuildToolKind {
    pub fn is_known(self) -> bool {
        !matches!(self, BuildToolKind::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildToolKind::Gradle => "gradle",
            BuildToolKind::Maven => "maven",
            BuildToolKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait BuildToolDetector {
    /// Classify a directory from the names of its direct children.
    fn detect<S: AsRef<str>>(children: &[S]) -> BuildToolKind;

    /// Classify `path`, listing its direct children through `fs`.
    ///
    /// Non-directories and unreadable directories are `Unknown`.
    fn detect_path(fs: &dyn FileSystem, path: &Path) -> BuildToolKind {
        if !fs.is_dir(path) {
            return BuildToolKind::Unknown;
        }
        match fs.children(path) {
            Ok(children) => Self::detect(children.as_slice()),
            Err(e) => {
                tracing::debug!("Failed to list {}: {}", path.display(), e);
                BuildToolKind::Unknown
            }
        }
    }
}

pub struct DefaultBuildToolDetector;

impl BuildToolDetector for DefaultBuildToolDetector {
    fn detect<S: AsRef<str>>(children: &[S]) -> BuildToolKind {
        // Gradle wins over Maven when a directory carries both
        if children
            .iter()
            .any(|child| GRADLE_MARKERS.contains(&child.as_ref()))
        {
            return BuildToolKind::Gradle;
        }

        if children.iter().any(|child| child.as_ref() == MAVEN_MARKER) {
            return BuildToolKind::Maven;
        }

        BuildToolKind::Unknown
    }
}
