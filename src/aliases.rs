//! Movable major/minor alias tag resolution.
//!
//! An alias tag (`{prefix}X` or `{prefix}X.Y`) always points at the highest
//! stable release in its series. Eligibility is recomputed from the complete
//! tag listing on every release event, never from a cached prior decision,
//! which makes the resolver idempotent and safe across multiple release
//! branches. RC tags never contribute to the computation and never trigger
//! an alias mutation.

use crate::domain::{ReleaseVersion, TagRecord};
use crate::error::Result;
use crate::github::GitHost;
use crate::grammar::TagGrammar;
use crate::sequencer::classify;
use crate::ui;

/// Which alias tags were (or would be) updated for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AliasDecision {
    pub major: bool,
    pub minor: bool,
}

/// Highest GA/patch release with the given major, by `(minor, patch)`
pub fn find_highest_in_major(
    tags: &[TagRecord],
    major: u64,
    grammar: &TagGrammar,
) -> Option<ReleaseVersion> {
    tags.iter()
        .filter_map(|tag| classify(&tag.name, grammar).release_version())
        .filter(|version| version.major == major)
        .max()
}

/// Highest GA/patch release in the exact `(major, minor)` series, by patch
pub fn find_highest_in_minor(
    tags: &[TagRecord],
    major: u64,
    minor: u64,
    grammar: &TagGrammar,
) -> Option<ReleaseVersion> {
    tags.iter()
        .filter_map(|tag| classify(&tag.name, grammar).release_version())
        .filter(|version| version.major == major && version.minor == minor)
        .max()
}

/// Whether a release is the highest in its major series.
///
/// `>=` rather than `>` so that reprocessing the release that is already
/// highest still qualifies (re-moving the alias to the same commit is
/// harmless).
pub fn should_update_major_alias(
    tags: &[TagRecord],
    candidate: ReleaseVersion,
    grammar: &TagGrammar,
) -> bool {
    match find_highest_in_major(tags, candidate.major, grammar) {
        Some(highest) => candidate >= highest,
        None => true,
    }
}

/// Whether a release is the highest in its minor series
pub fn should_update_minor_alias(
    tags: &[TagRecord],
    candidate: ReleaseVersion,
    grammar: &TagGrammar,
) -> bool {
    match find_highest_in_minor(tags, candidate.major, candidate.minor, grammar) {
        Some(highest) => candidate >= highest,
        None => true,
    }
}

/// Create or force-move the alias tags owed to a release.
///
/// RC tags return `{false, false}` without touching anything; that is a hard
/// rule, not a shortcut. Unparseable tag names log a warning and update
/// nothing. When `skip_minor` is set the minor alias is never attempted,
/// regardless of eligibility. The major alias is always evaluated
/// independently of the minor outcome.
///
/// In dry-run mode the decision is computed and reported but no mutation is
/// issued.
pub fn update_alias_tags(
    host: &dyn GitHost,
    tags: &[TagRecord],
    tag_name: &str,
    commit: &str,
    grammar: &TagGrammar,
    skip_minor: bool,
    dry_run: bool,
) -> Result<AliasDecision> {
    let mut decision = AliasDecision::default();

    let class = classify(tag_name, grammar);
    if class.is_rc() {
        ui::display_debug(&format!("Skipping alias updates for RC release '{}'", tag_name));
        return Ok(decision);
    }

    let candidate = match class.release_version() {
        Some(version) => version,
        None => {
            ui::display_warning(&format!(
                "Cannot parse release tag '{}', skipping alias updates",
                tag_name
            ));
            return Ok(decision);
        }
    };

    if !skip_minor && should_update_minor_alias(tags, candidate, grammar) {
        let alias = grammar.minor_alias(candidate.major, candidate.minor);
        apply_alias(host, &alias, commit, dry_run)?;
        decision.minor = true;
        ui::display_success(&format!("Minor alias '{}' now points at '{}'", alias, tag_name));
    }

    if should_update_major_alias(tags, candidate, grammar) {
        let alias = grammar.major_alias(candidate.major);
        apply_alias(host, &alias, commit, dry_run)?;
        decision.major = true;
        ui::display_success(&format!("Major alias '{}' now points at '{}'", alias, tag_name));
    }

    Ok(decision)
}

fn apply_alias(host: &dyn GitHost, alias: &str, commit: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        ui::display_dry_run(&format!(
            "Would point alias '{}' at {}",
            alias,
            ui::short_sha(commit)
        ));
        return Ok(());
    }
    if host.tag_exists(alias)? {
        host.force_move_tag(alias, commit)
    } else {
        host.create_tag(alias, commit, &format!("Alias tag {}", alias))
    }
}
