/// One tag as reported by the hosting collaborator's tag listing.
///
/// A read-only snapshot row: the engine classifies these, it never mutates
/// them. The commit id is opaque; the engine only compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub commit: String,
}

impl TagRecord {
    /// Create a new tag record
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        TagRecord {
            name: name.into(),
            commit: commit.into(),
        }
    }
}

/// Classification of a tag name under the configured tag grammar.
///
/// GA and patch tags share the `{prefix}X.Y.Z` lexical shape and differ only
/// in meaning: patch 0 is the GA release of its minor series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Release candidate: `{prefix}X.Y.0-rcN`
    Rc { major: u64, minor: u64, rc: u64 },
    /// General availability: `{prefix}X.Y.0`
    Ga { major: u64, minor: u64 },
    /// Stable fix release: `{prefix}X.Y.Z` with Z > 0
    Patch { major: u64, minor: u64, patch: u64 },
    /// Anything that does not match the tag grammar
    Unrecognized,
}

impl TagClass {
    /// True for RC classifications
    pub fn is_rc(&self) -> bool {
        matches!(self, TagClass::Rc { .. })
    }

    /// The stable release version, if this is a GA or patch tag
    pub fn release_version(&self) -> Option<super::ReleaseVersion> {
        match *self {
            TagClass::Ga { major, minor } => Some(super::ReleaseVersion::new(major, minor, 0)),
            TagClass::Patch {
                major,
                minor,
                patch,
            } => Some(super::ReleaseVersion::new(major, minor, patch)),
            _ => None,
        }
    }
}
