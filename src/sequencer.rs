//! Tag classification and next-tag sequencing.
//!
//! Pure functions over an already-fetched tag listing snapshot. The engine
//! never stores sequence state between invocations; each "next" number is
//! recomputed as highest-existing-plus-one, which keeps RC and patch numbers
//! gapless by construction and makes re-runs self-correcting.

use crate::domain::{TagClass, TagRecord};
use crate::grammar::TagGrammar;

/// Classify a tag name under the configured tag grammar.
///
/// The RC pattern is tried first; it is structurally disjoint from the
/// release pattern (the literal `.0-rc` suffix never parses as a numeric
/// patch component), so ordering only matters for clarity.
pub fn classify(tag_name: &str, grammar: &TagGrammar) -> TagClass {
    if let Some((major, minor, rc)) = grammar.match_rc(tag_name) {
        return TagClass::Rc { major, minor, rc };
    }
    if let Some((major, minor, patch)) = grammar.match_release(tag_name) {
        if patch == 0 {
            return TagClass::Ga { major, minor };
        }
        return TagClass::Patch {
            major,
            minor,
            patch,
        };
    }
    TagClass::Unrecognized
}

/// Highest RC number for the `{major}.{minor}` series, if any RC tag exists
pub fn find_highest_rc(
    tags: &[TagRecord],
    major: u64,
    minor: u64,
    grammar: &TagGrammar,
) -> Option<u64> {
    tags.iter()
        .filter_map(|tag| match classify(&tag.name, grammar) {
            TagClass::Rc {
                major: m,
                minor: n,
                rc,
            } if m == major && n == minor => Some(rc),
            _ => None,
        })
        .max()
}

/// Highest patch number for the series, GA contributing patch value 0
pub fn find_highest_patch(
    tags: &[TagRecord],
    major: u64,
    minor: u64,
    grammar: &TagGrammar,
) -> Option<u64> {
    tags.iter()
        .filter_map(|tag| match classify(&tag.name, grammar) {
            TagClass::Ga {
                major: m,
                minor: n,
            } if m == major && n == minor => Some(0),
            TagClass::Patch {
                major: m,
                minor: n,
                patch,
            } if m == major && n == minor => Some(patch),
            _ => None,
        })
        .max()
}

/// True iff the GA tag `{prefix}{major}.{minor}.0` is present in the listing
pub fn ga_exists(tags: &[TagRecord], major: u64, minor: u64, grammar: &TagGrammar) -> bool {
    let ga_tag = grammar.release_tag(major, minor, 0);
    tags.iter().any(|tag| tag.name == ga_tag)
}

/// Name of the next RC tag for the series (`rc1` when none exists yet)
pub fn next_rc_tag(tags: &[TagRecord], major: u64, minor: u64, grammar: &TagGrammar) -> String {
    let next = match find_highest_rc(tags, major, minor, grammar) {
        Some(highest) => highest + 1,
        None => 1,
    };
    grammar.rc_tag(major, minor, next)
}

/// Name of the next patch tag for the series.
///
/// Callers are expected to confirm GA exists before invoking this; when it
/// does not, the answer is still computed from whatever patch-shaped tags
/// are present ("no patches found" seeds patch 1, same as a bare GA).
pub fn next_patch_tag(tags: &[TagRecord], major: u64, minor: u64, grammar: &TagGrammar) -> String {
    let next = match find_highest_patch(tags, major, minor, grammar) {
        Some(highest) => highest + 1,
        None => 1,
    };
    grammar.release_tag(major, minor, next)
}
