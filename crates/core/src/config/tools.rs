use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradleConfig {
    /// Executable to run instead of the wrapper/`gradle` lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Gradle version to assume instead of reading the wrapper properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MavenConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "DiscoveryConfig::default_max_depth")]
    pub max_depth: usize,
    /// Directory names never searched for modules. Hidden directories are
    /// always skipped.
    #[serde(default = "DiscoveryConfig::default_exclude")]
    pub exclude: Vec<String>,
}

impl DiscoveryConfig {
    fn default_max_depth() -> usize {
        6
    }

    fn default_exclude() -> Vec<String> {
        ["build", "target", "node_modules", "out"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        dir_name.starts_with('.') || self.exclude.iter().any(|e| e == dir_name)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
            exclude: Self::default_exclude(),
        }
    }
}
