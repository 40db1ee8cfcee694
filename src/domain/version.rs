use crate::domain::prerelease::PreRelease;
use crate::error::{Error, Result};
use std::fmt;

/// Semantic version as recorded in a project file
///
/// A missing pre-release label means a final release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<PreRelease>,
}

impl Version {
    /// Create a new final version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Same numbers with the given pre-release label
    pub fn with_prerelease(self, prerelease: PreRelease) -> Self {
        Version {
            prerelease: Some(prerelease),
            ..self
        }
    }

    /// Same numbers without a pre-release label
    pub fn finalized(self) -> Self {
        Version {
            prerelease: None,
            ..self
        }
    }

    pub fn is_final(&self) -> bool {
        self.prerelease.is_none()
    }

    /// Parse a version such as `1.2.3`, `1.2` or `2.0.0-rc.1`
    ///
    /// Missing trailing numeric components default to 0. More than three numeric
    /// components are rejected rather than silently dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::parse("Version string can not be empty."));
        }

        let (numbers, label) = match text.split_once('-') {
            Some((numbers, label)) => (numbers, Some(label)),
            None => (text, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() > 3 {
            return Err(Error::parse(format!(
                "Version '{}' has more than three numeric components.",
                text
            )));
        }

        let component = |index: usize, name: &str| -> Result<u32> {
            match parts.get(index) {
                Some(part) => part.parse::<u32>().map_err(|_| {
                    Error::parse(format!("{} version number could not be parsed.", name))
                }),
                None => Ok(0),
            }
        };

        let major = component(0, "Major")?;
        let minor = component(1, "Minor")?;
        let patch = component(2, "Patch")?;
        let prerelease = label.map(PreRelease::parse).transpose()?;

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// Equivalent `semver::Version`, used for precedence comparisons
    pub fn to_semver(&self) -> semver::Version {
        let mut version = semver::Version::new(
            u64::from(self.major),
            u64::from(self.minor),
            u64::from(self.patch),
        );
        if let Some(prerelease) = &self.prerelease {
            // Rendered labels are always valid SemVer pre-release identifiers
            version.pre = semver::Prerelease::new(&prerelease.to_string())
                .unwrap_or(semver::Prerelease::EMPTY);
        }
        version
    }

    /// True when `self` has lower SemVer precedence than `other`
    pub fn precedes(&self, other: &Version) -> bool {
        self.to_semver() < other.to_semver()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prerelease::Channel;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
        assert!(v.is_final());
    }

    #[test]
    fn test_version_parse_legacy_short_forms() {
        assert_eq!(Version::parse("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(Version::parse("7").unwrap(), Version::new(7, 0, 0));
    }

    #[test]
    fn test_version_parse_with_prerelease() {
        let v = Version::parse("2.0.0-rc.1").unwrap();
        assert_eq!(
            v,
            Version::new(2, 0, 0).with_prerelease(PreRelease::first(Channel::ReleaseCandidate))
        );
    }

    #[test]
    fn test_version_parse_trims_whitespace() {
        assert_eq!(Version::parse("  1.2.3\n").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_empty() {
        let err = Version::parse("   ").unwrap_err();
        assert_eq!(err.to_string(), "Version string can not be empty.");
    }

    #[test]
    fn test_version_parse_reports_failing_component() {
        assert_eq!(
            Version::parse("x.1.2").unwrap_err().to_string(),
            "Major version number could not be parsed."
        );
        assert_eq!(
            Version::parse("1.y.2").unwrap_err().to_string(),
            "Minor version number could not be parsed."
        );
        assert_eq!(
            Version::parse("1.2.z").unwrap_err().to_string(),
            "Patch version number could not be parsed."
        );
    }

    #[test]
    fn test_version_parse_rejects_negative_and_extra_components() {
        assert!(Version::parse("-1.0.0").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1..3").is_err());
    }

    #[test]
    fn test_version_parse_rejects_unknown_label() {
        assert!(matches!(
            Version::parse("1.0.0-preview.1"),
            Err(Error::Parse(_))
        ));
        assert!(Version::parse("1.0.0-").is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        let v = Version::new(1, 0, 0).with_prerelease(PreRelease::new(Channel::Beta, 4).unwrap());
        assert_eq!(v.to_string(), "1.0.0-beta.4");
    }

    #[test]
    fn test_version_round_trip() {
        for text in ["0.0.0", "1.2.3", "10.20.30-alpha.1", "2.0.0-beta.12", "3.1.4-rc.2"] {
            let v = Version::parse(text).unwrap();
            assert_eq!(v.to_string(), text);
            assert_eq!(Version::parse(&v.to_string()).unwrap(), v);
        }
    }

    #[test]
    fn test_finalized_clears_label() {
        let v = Version::parse("2.0.0-rc.1").unwrap();
        assert_eq!(v.finalized(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_precedence_follows_channel_order() {
        let alpha = Version::parse("1.0.0-alpha.2").unwrap();
        let beta = Version::parse("1.0.0-beta.1").unwrap();
        let rc = Version::parse("1.0.0-rc.1").unwrap();
        let final_release = Version::parse("1.0.0").unwrap();

        assert!(alpha.precedes(&beta));
        assert!(beta.precedes(&rc));
        assert!(rc.precedes(&final_release));
        assert!(!final_release.precedes(&rc));
    }

    #[test]
    fn test_precedence_compares_counters_numerically() {
        let two = Version::parse("1.0.0-rc.2").unwrap();
        let ten = Version::parse("1.0.0-rc.10").unwrap();
        assert!(two.precedes(&ten));
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Version::default().to_string(), "0.0.0");
    }
}
