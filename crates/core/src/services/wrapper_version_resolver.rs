//! Gradle version lookup from the wrapper properties

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::{
    build_system::ToolVersion,
    error::{Error, Result},
    interfaces::VersionResolver,
};

const WRAPPER_PROPERTIES: &str = "gradle/wrapper/gradle-wrapper.properties";

/// Resolves the Gradle version linked to a project directory.
///
/// A configured version wins. Otherwise the nearest
/// `gradle/wrapper/gradle-wrapper.properties` at or above the project path is
/// read and the version taken from its `distributionUrl`.
#[derive(Debug, Clone, Default)]
pub struct GradleWrapperVersionResolver {
    configured: Option<String>,
}

impl GradleWrapperVersionResolver {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }

    fn find_properties(project_path: &Path) -> Option<PathBuf> {
        project_path
            .ancestors()
            .map(|dir| dir.join(WRAPPER_PROPERTIES))
            .find(|candidate| candidate.is_file())
    }

    pub fn version_from_properties(contents: &str) -> Result<ToolVersion> {
        static DISTRIBUTION_RE: OnceLock<Regex> = OnceLock::new();
        let re = DISTRIBUTION_RE.get_or_init(|| {
            Regex::new(r"gradle-([0-9][^/\s]*?)-(?:bin|all)\.zip")
                .expect("distribution pattern is valid")
        });

        let url = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .find_map(|line| {
                let (key, value) = line.split_once('=')?;
                (key.trim() == "distributionUrl").then(|| value.trim())
            })
            .ok_or_else(|| Error::UnresolvedVersion("no distributionUrl".to_string()))?;

        let version = re
            .captures(url)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| {
                Error::UnresolvedVersion(format!("unrecognized distributionUrl '{url}'"))
            })?;

        ToolVersion::parse(version.as_str())
    }
}

impl VersionResolver for GradleWrapperVersionResolver {
    fn resolve_version(&self, project_path: &Path) -> Result<ToolVersion> {
        if let Some(ref configured) = self.configured {
            return ToolVersion::parse(configured);
        }

        let properties = Self::find_properties(project_path).ok_or_else(|| {
            Error::UnresolvedVersion(format!(
                "no Gradle wrapper properties at or above {}",
                project_path.display()
            ))
        })?;

        tracing::debug!("Reading Gradle version from {}", properties.display());
        let contents = std::fs::read_to_string(&properties)?;
        Self::version_from_properties(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PROPERTIES: &str = "distributionBase=GRADLE_USER_HOME\n\
        distributionPath=wrapper/dists\n\
        distributionUrl=https\\://services.gradle.org/distributions/gradle-8.10.2-bin.zip\n\
        zipStoreBase=GRADLE_USER_HOME\n";

    #[test]
    fn test_version_from_properties() {
        let version = GradleWrapperVersionResolver::version_from_properties(PROPERTIES).unwrap();
        assert_eq!(version, ToolVersion::new(8, 10).with_patch(2));
    }

    #[test]
    fn test_version_from_properties_all_distribution() {
        let contents = "distributionUrl=https\\://example.com/gradle-6.5-rc-1-all.zip";
        let version = GradleWrapperVersionResolver::version_from_properties(contents).unwrap();
        assert_eq!((version.major, version.minor), (6, 5));
    }

    #[test]
    fn test_missing_distribution_url() {
        let result = GradleWrapperVersionResolver::version_from_properties("# nothing here\n");
        assert!(matches!(result, Err(Error::UnresolvedVersion(_))));
    }

    #[test]
    fn test_resolve_from_ancestor_wrapper() {
        let temp_dir = TempDir::new().unwrap();
        let wrapper = temp_dir.path().join("gradle/wrapper");
        fs::create_dir_all(&wrapper).unwrap();
        fs::write(wrapper.join("gradle-wrapper.properties"), PROPERTIES).unwrap();
        let module = temp_dir.path().join("app");
        fs::create_dir_all(&module).unwrap();

        let version = GradleWrapperVersionResolver::default()
            .resolve_version(&module)
            .unwrap();
        assert_eq!(version.major, 8);
    }

    #[test]
    fn test_configured_version_wins() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = GradleWrapperVersionResolver::new(Some("6.5.1".to_string()));
        let version = resolver.resolve_version(temp_dir.path()).unwrap();
        assert_eq!(version, ToolVersion::new(6, 5).with_patch(1));
    }
}
