//! Tool version parsing and the configuration-cache flag gate

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::{
    error::{Error, Result},
    interfaces::VersionResolver,
};

/// Flag that disables Gradle's configuration cache for the spotless task.
pub const NO_CONFIGURATION_CACHE_FLAG: &str = "--no-configuration-cache";

/// A `major.minor[.patch][-qualifier]` tool version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
    pub qualifier: Option<String>,
}

impl ToolVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
            qualifier: None,
        }
    }

    pub fn with_patch(mut self, patch: u32) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn parse(input: &str) -> Result<Self> {
        static VERSION_RE: OnceLock<Regex> = OnceLock::new();
        let re = VERSION_RE.get_or_init(|| {
            Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:[-+.](\S+))?$")
                .expect("version pattern is valid")
        });

        let trimmed = input.trim();
        let caps = re
            .captures(trimmed)
            .ok_or_else(|| Error::UnresolvedVersion(format!("unrecognized version '{trimmed}'")))?;

        let number = |idx: usize| -> Result<Option<u32>> {
            caps.get(idx)
                .map(|m| {
                    m.as_str().parse::<u32>().map_err(|e| {
                        Error::UnresolvedVersion(format!("invalid version '{trimmed}': {e}"))
                    })
                })
                .transpose()
        };

        Ok(Self {
            major: number(1)?.unwrap_or(0),
            minor: number(2)?.unwrap_or(0),
            patch: number(3)?,
            qualifier: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// Compare on major, then minor. Patch and qualifier are ignored.
    pub fn cmp_major_minor(&self, other: &ToolVersion) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
    }

    pub fn is_at_least(&self, threshold: &ToolVersion) -> bool {
        self.cmp_major_minor(threshold) != Ordering::Less
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        if let Some(ref qualifier) = self.qualifier {
            write!(f, "-{qualifier}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ToolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Decides whether the Gradle invocation needs `--no-configuration-cache`.
pub struct VersionGate;

impl VersionGate {
    /// First Gradle version that needs the flag.
    pub const THRESHOLD: ToolVersion = ToolVersion::new(6, 6);

    pub fn requires_compatibility_flag(version: &ToolVersion) -> bool {
        version.is_at_least(&Self::THRESHOLD)
    }

    /// Resolve the linked tool version for `project_path` and gate on it.
    ///
    /// Resolution failures never propagate: they log a warning and leave the
    /// flag off.
    pub fn evaluate(resolver: &dyn VersionResolver, project_path: &Path) -> bool {
        match resolver.resolve_version(project_path) {
            Ok(version) => {
                let required = Self::requires_compatibility_flag(&version);
                tracing::debug!(
                    "Gradle {} at {}: {} {}",
                    version,
                    project_path.display(),
                    if required { "adding" } else { "skipping" },
                    NO_CONFIGURATION_CACHE_FLAG
                );
                required
            }
            Err(e) => {
                tracing::warn!(
                    "Unable to parse linked project settings for {} ({}), leaving off `{}` argument",
                    project_path.display(),
                    e,
                    NO_CONFIGURATION_CACHE_FLAG
                );
                false
            }
        }
    }
}
