//! Event routing and release state machine.
//!
//! Maps one of four trigger kinds to the right sequence of grammar,
//! sequencer, and alias-resolver calls plus collaborator side effects. The
//! conceptual per-series lifecycle is
//! `NoTags -> rc1 -> rc2 -> ... -> GA -> patch1 -> patch2 -> ...`, but no
//! state is stored anywhere: the position in that sequence is re-inferred
//! from the tag listing on every invocation. The listing is fetched at most
//! once per dispatch and passed into the pure decision functions.
//!
//! GA is never produced automatically. A commit push while no GA exists
//! advances the RC number; the GA tag itself only ever arrives as a manual
//! tag push.

use crate::aliases;
use crate::config::{ActionInputs, EventContext};
use crate::domain::{TagClass, TagRecord};
use crate::error::{ReleaseTaggerError, Result};
use crate::github::GitHost;
use crate::grammar::{should_skip_minor_alias, BranchGrammar, TagGrammar};
use crate::outputs::{ActionOutputs, TagType};
use crate::sequencer;
use crate::ui;

/// The four trigger kinds the action responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    BranchCreate,
    CommitPush,
    TagPush,
    WorkflowDispatch,
    Unhandled,
}

impl Trigger {
    /// Derive the trigger kind from the event context
    pub fn from_context(context: &EventContext) -> Self {
        match (context.event_name.as_str(), context.ref_type.as_str()) {
            ("create", "branch") => Trigger::BranchCreate,
            ("push", "branch") => Trigger::CommitPush,
            ("push", "tag") => Trigger::TagPush,
            ("workflow_dispatch", _) => Trigger::WorkflowDispatch,
            _ => Trigger::Unhandled,
        }
    }
}

/// Routes events to handlers over a hosting collaborator.
///
/// Grammars are compiled once at construction; prefixes are constant for the
/// lifetime of one invocation.
pub struct Router<'a> {
    host: &'a dyn GitHost,
    inputs: &'a ActionInputs,
    branch_grammar: BranchGrammar,
    tag_grammar: TagGrammar,
}

impl<'a> Router<'a> {
    /// Build a router for validated inputs
    pub fn new(host: &'a dyn GitHost, inputs: &'a ActionInputs) -> Result<Self> {
        Ok(Router {
            host,
            inputs,
            branch_grammar: BranchGrammar::new(&inputs.release_prefix)?,
            tag_grammar: TagGrammar::new(&inputs.tag_prefix)?,
        })
    }

    /// Route one event to its handler.
    ///
    /// Grammar mismatches on branch/tag names are reported as `skipped`;
    /// only an unreachable manual tag or an invalid dispatch target escalate
    /// to an error.
    pub fn dispatch(&self, context: &EventContext) -> Result<ActionOutputs> {
        match Trigger::from_context(context) {
            Trigger::BranchCreate => self.handle_branch_create(context),
            Trigger::CommitPush => self.handle_commit_push(context, &context.ref_name),
            Trigger::TagPush => self.handle_tag_push(context),
            Trigger::WorkflowDispatch => self.handle_workflow_dispatch(context),
            Trigger::Unhandled => {
                ui::display_warning(&format!(
                    "Unhandled event: {} (ref_type: {}). Skipping.",
                    context.event_name, context.ref_type
                ));
                Ok(ActionOutputs::skipped())
            }
        }
    }

    /// Branch creation: a brand-new release branch has no tags yet, so the
    /// first tag is always `rc1`, computed literally without consulting the
    /// listing.
    pub fn handle_branch_create(&self, context: &EventContext) -> Result<ActionOutputs> {
        let branch = &context.ref_name;
        let version = match self.branch_grammar.parse(branch) {
            Some(version) => version,
            None => {
                ui::display_status(&format!(
                    "Branch '{}' does not match {}X.Y pattern, skipping",
                    branch,
                    self.branch_grammar.prefix()
                ));
                return Ok(ActionOutputs::skipped());
            }
        };

        let tag_name = self.tag_grammar.rc_tag(version.major, version.minor, 1);
        self.create_tag(
            &tag_name,
            &context.sha,
            &format!("Release candidate {}", tag_name),
        )?;

        Ok(ActionOutputs {
            tag: tag_name,
            tag_type: TagType::Rc,
            major: version.major.to_string(),
            minor: version.minor.to_string(),
        })
    }

    /// Commit push: next patch tag when GA exists, next RC tag otherwise.
    pub fn handle_commit_push(
        &self,
        context: &EventContext,
        branch: &str,
    ) -> Result<ActionOutputs> {
        let version = match self.branch_grammar.parse(branch) {
            Some(version) => version,
            None => {
                ui::display_status(&format!(
                    "Branch '{}' does not match {}X.Y pattern, skipping",
                    branch,
                    self.branch_grammar.prefix()
                ));
                return Ok(ActionOutputs::skipped());
            }
        };

        let tags = self.host.list_tags()?;
        let mut outputs = ActionOutputs {
            major: version.major.to_string(),
            minor: version.minor.to_string(),
            ..ActionOutputs::default()
        };

        // Duplicate guard: a re-fired push event for an already-tagged
        // commit must not create a second tag.
        if let Some(existing) = self.commit_version_tag(&tags, &context.sha) {
            ui::display_status(&format!(
                "Commit {} already has tag '{}', skipping tag creation",
                ui::short_sha(&context.sha),
                existing
            ));
            outputs.tag = existing;
            outputs.tag_type = TagType::Skipped;
            return Ok(outputs);
        }

        if sequencer::ga_exists(&tags, version.major, version.minor, &self.tag_grammar) {
            let tag_name =
                sequencer::next_patch_tag(&tags, version.major, version.minor, &self.tag_grammar);
            self.create_tag(
                &tag_name,
                &context.sha,
                &format!("Patch release {}", tag_name),
            )?;
            if self.inputs.aliases {
                self.update_aliases(&tags, &tag_name, &context.sha)?;
            }
            outputs.tag = tag_name;
            outputs.tag_type = TagType::Patch;
        } else {
            let tag_name =
                sequencer::next_rc_tag(&tags, version.major, version.minor, &self.tag_grammar);
            self.create_tag(
                &tag_name,
                &context.sha,
                &format!("Release candidate {}", tag_name),
            )?;
            outputs.tag = tag_name;
            outputs.tag_type = TagType::Rc;
        }

        Ok(outputs)
    }

    /// Manual tag push: validate reachability from the release branch, then
    /// update aliases for GA/patch tags. RC tags are recorded only.
    pub fn handle_tag_push(&self, context: &EventContext) -> Result<ActionOutputs> {
        let tag_name = &context.ref_name;
        let (major, minor, tag_type) = match sequencer::classify(tag_name, &self.tag_grammar) {
            TagClass::Rc { major, minor, .. } => (major, minor, TagType::Rc),
            TagClass::Ga { major, minor } => (major, minor, TagType::Ga),
            TagClass::Patch { major, minor, .. } => (major, minor, TagType::Patch),
            TagClass::Unrecognized => {
                ui::display_warning(&format!(
                    "Tag '{}' is not a valid SemVer tag with prefix '{}', skipping",
                    tag_name,
                    self.tag_grammar.prefix()
                ));
                return Ok(ActionOutputs::skipped());
            }
        };

        let release_branch = format!("{}{}.{}", self.branch_grammar.prefix(), major, minor);
        if !self.commit_reachable_from(&context.sha, &release_branch) {
            return Err(ReleaseTaggerError::validation(format!(
                "Tag '{}' does not point to a commit on branch '{}'",
                tag_name, release_branch
            )));
        }

        ui::display_success(&format!("Validated {} tag '{}'", tag_type, tag_name));

        // RC tags are recorded only; GA/patch tags drive the aliases.
        if tag_type != TagType::Rc && self.inputs.aliases {
            let tags = self.host.list_tags()?;
            self.update_aliases(&tags, tag_name, &context.sha)?;
        }

        Ok(ActionOutputs {
            tag: tag_name.clone(),
            tag_type,
            major: major.to_string(),
            minor: minor.to_string(),
        })
    }

    /// Workflow dispatch: a synthetic push to the resolved target branch.
    /// An invalid target branch is a configuration mistake, so unlike a real
    /// push it fails instead of skipping.
    pub fn handle_workflow_dispatch(&self, context: &EventContext) -> Result<ActionOutputs> {
        let target = if self.inputs.target_branch.is_empty() {
            context.ref_name.clone()
        } else {
            self.inputs.target_branch.clone()
        };

        if self.branch_grammar.parse(&target).is_none() {
            return Err(ReleaseTaggerError::validation(format!(
                "target-branch '{}' must match {}X.Y pattern",
                target,
                self.branch_grammar.prefix()
            )));
        }

        ui::display_status(&format!("Processing workflow_dispatch for branch '{}'", target));
        self.handle_commit_push(context, &target)
    }

    /// Existing version tag on a commit, if any (duplicate-tag guard)
    fn commit_version_tag(&self, tags: &[TagRecord], sha: &str) -> Option<String> {
        tags.iter()
            .find(|tag| tag.commit == sha && tag.name.starts_with(self.tag_grammar.prefix()))
            .map(|tag| tag.name.clone())
    }

    /// Reachability check for manual tags. A collaborator failure is
    /// conservatively treated as "not reachable" (fail closed).
    fn commit_reachable_from(&self, sha: &str, branch: &str) -> bool {
        match self.host.branch_commits(branch) {
            Ok(commits) => commits.iter().any(|commit| commit == sha),
            Err(err) => {
                ui::display_error(&format!(
                    "Failed to get commits from branch '{}': {}",
                    branch, err
                ));
                false
            }
        }
    }

    fn create_tag(&self, name: &str, commit: &str, message: &str) -> Result<()> {
        if self.inputs.dry_run {
            ui::display_dry_run(&format!(
                "Would create tag '{}' at {}",
                name,
                ui::short_sha(commit)
            ));
            return Ok(());
        }
        ui::display_status(&format!(
            "Creating tag '{}' at commit {}",
            name,
            ui::short_sha(commit)
        ));
        self.host.create_tag(name, commit, message)?;
        ui::display_success(&format!("Created tag '{}'", name));
        Ok(())
    }

    fn update_aliases(
        &self,
        tags: &[TagRecord],
        tag_name: &str,
        commit: &str,
    ) -> Result<aliases::AliasDecision> {
        let skip_minor =
            should_skip_minor_alias(&self.inputs.release_prefix, &self.inputs.tag_prefix);
        aliases::update_alias_tags(
            self.host,
            tags,
            tag_name,
            commit,
            &self.tag_grammar,
            skip_minor,
            self.inputs.dry_run,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(event: &str, ref_type: &str) -> EventContext {
        EventContext {
            event_name: event.to_string(),
            ref_name: String::new(),
            ref_type: ref_type.to_string(),
            sha: String::new(),
            repository: String::new(),
        }
    }

    #[test]
    fn test_trigger_mapping() {
        assert_eq!(
            Trigger::from_context(&context("create", "branch")),
            Trigger::BranchCreate
        );
        assert_eq!(
            Trigger::from_context(&context("push", "branch")),
            Trigger::CommitPush
        );
        assert_eq!(
            Trigger::from_context(&context("push", "tag")),
            Trigger::TagPush
        );
        assert_eq!(
            Trigger::from_context(&context("workflow_dispatch", "")),
            Trigger::WorkflowDispatch
        );
        assert_eq!(
            Trigger::from_context(&context("pull_request", "branch")),
            Trigger::Unhandled
        );
        assert_eq!(
            Trigger::from_context(&context("create", "tag")),
            Trigger::Unhandled
        );
    }
}
