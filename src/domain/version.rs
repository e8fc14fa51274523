use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation (no pre-release or build metadata)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a plain `X.Y.Z` version string as stored in a manifest.
    ///
    /// Pre-release and build suffixes are rejected rather than silently dropped.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed = semver::Version::parse(raw.trim())
            .map_err(|e| BumpError::version(format!("Invalid version '{}': {}", raw, e)))?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(BumpError::version(format!(
                "Invalid version '{}': pre-release and build metadata are not supported",
                raw
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Apply a bump category. `BumpCategory::None` returns the version unchanged.
    ///
    /// Fails when the bumped component would overflow `u64`.
    pub fn bump(&self, category: BumpCategory) -> Result<Self> {
        let next = match category {
            BumpCategory::Major => self
                .major
                .checked_add(1)
                .map(|major| Version::new(major, 0, 0)),
            BumpCategory::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| Version::new(self.major, minor, 0)),
            BumpCategory::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| Version::new(self.major, self.minor, patch)),
            BumpCategory::None => Some(*self),
        };
        next.ok_or_else(|| {
            BumpError::version(format!("Cannot apply a {} bump to {}", category, self))
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Bump category selected from pull request labels.
///
/// Ordered `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpCategory {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpCategory {
    /// Lower-case name used in outputs and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpCategory::None => "none",
            BumpCategory::Patch => "patch",
            BumpCategory::Minor => "minor",
            BumpCategory::Major => "major",
        }
    }
}

impl fmt::Display for BumpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
