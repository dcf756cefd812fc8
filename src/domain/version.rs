use std::fmt;

/// Major.minor pair extracted from a release branch name.
///
/// Ordering is lexicographic on `(major, minor)`. Leading zeros are rejected
/// at parse time by the branch grammar, so a constructed value is always
/// canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64) -> Self {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Full major.minor.patch triple parsed from a GA or patch tag.
///
/// Never constructed from RC tags; the alias resolver only compares
/// stable releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ReleaseVersion {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ReleaseVersion {
            major,
            minor,
            patch,
        }
    }

    /// True for GA releases (patch component is literally 0)
    pub fn is_ga(&self) -> bool {
        self.patch == 0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
