//! Name grammar for release branches and version tags.
//!
//! Branch and tag patterns are parameterized by configurable prefixes. The
//! prefixes are constant for the lifetime of one invocation, so each grammar
//! compiles its regexes once at construction instead of per call. Prefixes
//! are escaped with [regex::escape] before composition so characters with
//! pattern meaning are matched literally.

use crate::domain::Version;
use crate::error::{ReleaseTaggerError, Result};
use regex::Regex;

/// Substrings that are invalid in a git ref name and therefore in a prefix.
const INVALID_REF_SUBSTRINGS: &[&str] = &[
    "..", "~", "^", ":", "\\", " ", "\t", "\n", "*", "?", "[",
];

/// Check that a prefix is usable in branch/tag names.
///
/// Returns false iff the prefix is empty or contains any substring that git
/// forbids in ref names. Total over all strings.
pub fn validate_prefix(prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    !INVALID_REF_SUBSTRINGS.iter().any(|s| prefix.contains(s))
}

/// True iff the minor alias tag must never be attempted.
///
/// When the release-branch prefix and the tag prefix are textually equal, a
/// minor alias tag `{prefix}X.Y` would collide with the release branch
/// `{prefix}X.Y` as a git ref, so the minor alias is skipped entirely.
pub fn should_skip_minor_alias(release_prefix: &str, tag_prefix: &str) -> bool {
    release_prefix == tag_prefix
}

/// Compiled pattern for release branch names: `{prefix}X.Y`.
///
/// The numeral alternation `0|[1-9][0-9]*` structurally excludes leading
/// zeros, per SemVer 2.0.0 rule 2. No separate leading-zero check is needed.
#[derive(Debug)]
pub struct BranchGrammar {
    pattern: Regex,
    prefix: String,
}

impl BranchGrammar {
    /// Compile the branch pattern for a validated release prefix
    pub fn new(release_prefix: &str) -> Result<Self> {
        let escaped = regex::escape(release_prefix);
        let pattern = Regex::new(&format!(
            "^{}(0|[1-9][0-9]*)\\.(0|[1-9][0-9]*)$",
            escaped
        ))
        .map_err(|e| {
            ReleaseTaggerError::config(format!(
                "Cannot compile branch pattern for prefix '{}': {}",
                release_prefix, e
            ))
        })?;

        Ok(BranchGrammar {
            pattern,
            prefix: release_prefix.to_string(),
        })
    }

    /// Parse a branch name into its major.minor version.
    ///
    /// Returns `None` for anything that does not match the grammar,
    /// including the empty string. A non-match is not an error.
    pub fn parse(&self, branch_name: &str) -> Option<Version> {
        let caps = self.pattern.captures(branch_name)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        Some(Version::new(major, minor))
    }

    /// The configured release prefix (for messages)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Compiled patterns for version tags under one tag prefix.
///
/// `rc` matches `{prefix}X.Y.0-rcN`; `release` matches `{prefix}X.Y.Z`
/// (GA when Z is 0). The two shapes are structurally disjoint because the
/// release pattern requires a purely numeric final component.
#[derive(Debug)]
pub struct TagGrammar {
    rc: Regex,
    release: Regex,
    prefix: String,
}

impl TagGrammar {
    /// Compile the RC and release patterns for a validated tag prefix
    pub fn new(tag_prefix: &str) -> Result<Self> {
        let escaped = regex::escape(tag_prefix);
        let compile = |pat: String| {
            Regex::new(&pat).map_err(|e| {
                ReleaseTaggerError::config(format!(
                    "Cannot compile tag pattern for prefix '{}': {}",
                    tag_prefix, e
                ))
            })
        };

        Ok(TagGrammar {
            rc: compile(format!("^{}(\\d+)\\.(\\d+)\\.0-rc(\\d+)$", escaped))?,
            release: compile(format!("^{}(\\d+)\\.(\\d+)\\.(\\d+)$", escaped))?,
            prefix: tag_prefix.to_string(),
        })
    }

    /// Capture (major, minor, rc) from an RC tag name
    pub fn match_rc(&self, tag_name: &str) -> Option<(u64, u64, u64)> {
        capture_triple(&self.rc, tag_name)
    }

    /// Capture (major, minor, patch) from a GA/patch tag name
    pub fn match_release(&self, tag_name: &str) -> Option<(u64, u64, u64)> {
        capture_triple(&self.release, tag_name)
    }

    /// The configured tag prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render the RC tag name for a series and RC number
    pub fn rc_tag(&self, major: u64, minor: u64, rc: u64) -> String {
        format!("{}{}.{}.0-rc{}", self.prefix, major, minor, rc)
    }

    /// Render the GA/patch tag name for a series and patch number
    pub fn release_tag(&self, major: u64, minor: u64, patch: u64) -> String {
        format!("{}{}.{}.{}", self.prefix, major, minor, patch)
    }

    /// Render the major alias tag name (`{prefix}X`)
    pub fn major_alias(&self, major: u64) -> String {
        format!("{}{}", self.prefix, major)
    }

    /// Render the minor alias tag name (`{prefix}X.Y`)
    pub fn minor_alias(&self, major: u64, minor: u64) -> String {
        format!("{}{}.{}", self.prefix, major, minor)
    }
}

fn capture_triple(pattern: &Regex, text: &str) -> Option<(u64, u64, u64)> {
    let caps = pattern.captures(text)?;
    let a = caps.get(1)?.as_str().parse().ok()?;
    let b = caps.get(2)?.as_str().parse().ok()?;
    let c = caps.get(3)?.as_str().parse().ok()?;
    Some((a, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prefix_accepts_common_prefixes() {
        assert!(validate_prefix("v"));
        assert!(validate_prefix("release/v"));
        assert!(validate_prefix("rel-"));
    }

    #[test]
    fn test_validate_prefix_rejects_empty() {
        assert!(!validate_prefix(""));
    }

    #[test]
    fn test_validate_prefix_rejects_ref_invalid_substrings() {
        for bad in ["a..b", "a~", "a^", "a:b", "a\\b", "a b", "a\tb", "a\nb", "a*", "a?", "a["] {
            assert!(!validate_prefix(bad), "should reject {:?}", bad);
        }
    }

    #[test]
    fn test_parse_branch_basic() {
        let grammar = BranchGrammar::new("release/v").unwrap();
        assert_eq!(grammar.parse("release/v1.2"), Some(Version::new(1, 2)));
        assert_eq!(grammar.parse("release/v0.1"), Some(Version::new(0, 1)));
        assert_eq!(grammar.parse("release/v0.0"), Some(Version::new(0, 0)));
    }

    #[test]
    fn test_parse_branch_rejects_leading_zeros() {
        let grammar = BranchGrammar::new("release/v").unwrap();
        assert_eq!(grammar.parse("release/v01.2"), None);
        assert_eq!(grammar.parse("release/v1.02"), None);
        assert_eq!(grammar.parse("release/v00.0"), None);
    }

    #[test]
    fn test_parse_branch_rejects_malformed() {
        let grammar = BranchGrammar::new("release/v").unwrap();
        assert_eq!(grammar.parse(""), None);
        assert_eq!(grammar.parse("release/v1"), None);
        assert_eq!(grammar.parse("release/v1.2.3"), None);
        assert_eq!(grammar.parse("feature/v1.2"), None);
        assert_eq!(grammar.parse("release/v1.2-beta"), None);
    }

    #[test]
    fn test_parse_branch_prefix_is_literal() {
        // A dot in the prefix must not act as a wildcard
        let grammar = BranchGrammar::new("rel.v").unwrap();
        assert_eq!(grammar.parse("rel.v1.2"), Some(Version::new(1, 2)));
        assert_eq!(grammar.parse("relXv1.2"), None);
    }

    #[test]
    fn test_parse_branch_prefix_mismatch() {
        let grammar = BranchGrammar::new("release/v").unwrap();
        assert_eq!(grammar.parse("hotfix/v1.2"), None);
    }

    #[test]
    fn test_match_rc_tag() {
        let grammar = TagGrammar::new("v").unwrap();
        assert_eq!(grammar.match_rc("v1.2.0-rc1"), Some((1, 2, 1)));
        assert_eq!(grammar.match_rc("v1.2.0-rc12"), Some((1, 2, 12)));
        assert_eq!(grammar.match_rc("v1.2.0"), None);
        assert_eq!(grammar.match_rc("v1.2.1-rc1"), None);
    }

    #[test]
    fn test_match_release_tag() {
        let grammar = TagGrammar::new("v").unwrap();
        assert_eq!(grammar.match_release("v1.2.0"), Some((1, 2, 0)));
        assert_eq!(grammar.match_release("v1.2.3"), Some((1, 2, 3)));
        assert_eq!(grammar.match_release("v1.2.0-rc1"), None);
        assert_eq!(grammar.match_release("v1.2"), None);
    }

    #[test]
    fn test_tag_rendering() {
        let grammar = TagGrammar::new("v").unwrap();
        assert_eq!(grammar.rc_tag(1, 2, 3), "v1.2.0-rc3");
        assert_eq!(grammar.release_tag(1, 2, 4), "v1.2.4");
        assert_eq!(grammar.major_alias(1), "v1");
        assert_eq!(grammar.minor_alias(1, 2), "v1.2");
    }

    #[test]
    fn test_should_skip_minor_alias() {
        assert!(should_skip_minor_alias("v", "v"));
        assert!(should_skip_minor_alias("release/v", "release/v"));
        assert!(!should_skip_minor_alias("release/v", "v"));
    }
}
