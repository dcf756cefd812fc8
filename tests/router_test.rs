//! End-to-end event routing scenarios over the mock hosting collaborator.

use release_tagger::config::{ActionInputs, EventContext};
use release_tagger::github::mock::{MockHost, Mutation};
use release_tagger::outputs::TagType;
use release_tagger::router::Router;

fn inputs() -> ActionInputs {
    ActionInputs {
        token: "token".to_string(),
        debug: false,
        dry_run: false,
        target_branch: String::new(),
        aliases: false,
        release_prefix: "release/v".to_string(),
        tag_prefix: "v".to_string(),
    }
}

fn branch_create_context(branch: &str, sha: &str) -> EventContext {
    EventContext {
        event_name: "create".to_string(),
        ref_name: branch.to_string(),
        ref_type: "branch".to_string(),
        sha: sha.to_string(),
        repository: "owner/repo".to_string(),
    }
}

fn push_context(ref_name: &str, ref_type: &str, sha: &str) -> EventContext {
    EventContext {
        event_name: "push".to_string(),
        ref_name: ref_name.to_string(),
        ref_type: ref_type.to_string(),
        sha: sha.to_string(),
        repository: "owner/repo".to_string(),
    }
}

#[test]
fn branch_creation_tags_rc1_at_head() {
    let host = MockHost::new();
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&branch_create_context("release/v1.2", "abc123"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.0-rc1");
    assert_eq!(outputs.tag_type, TagType::Rc);
    assert_eq!(outputs.major, "1");
    assert_eq!(outputs.minor, "2");
    assert_eq!(host.tag_commit("v1.2.0-rc1"), Some("abc123".to_string()));
}

#[test]
fn branch_creation_ignores_non_release_branches() {
    let host = MockHost::new();
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&branch_create_context("feature/v1.2", "abc123"))
        .unwrap();

    assert_eq!(outputs.tag_type, TagType::Skipped);
    assert!(host.mutations().is_empty());
}

#[test]
fn commit_push_advances_rc_while_no_ga() {
    let host = MockHost::new();
    host.add_tag("v1.2.0-rc1", "sha1");
    host.add_tag("v1.2.0-rc2", "sha2");
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("release/v1.2", "branch", "sha3"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.0-rc3");
    assert_eq!(outputs.tag_type, TagType::Rc);
}

#[test]
fn commit_push_creates_patch_once_ga_exists() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "sha0");
    host.add_tag("v1.2.1", "sha1");
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("release/v1.2", "branch", "sha2"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.2");
    assert_eq!(outputs.tag_type, TagType::Patch);
    assert_eq!(host.tag_commit("v1.2.2"), Some("sha2".to_string()));
}

#[test]
fn commit_push_duplicate_guard_reports_existing_tag() {
    let host = MockHost::new();
    host.add_tag("v1.2.0-rc1", "sha1");
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    // Same commit push fires again (e.g. a workflow re-run)
    let outputs = router
        .dispatch(&push_context("release/v1.2", "branch", "sha1"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.0-rc1");
    assert_eq!(outputs.tag_type, TagType::Skipped);
    assert!(host.mutations().is_empty());
}

#[test]
fn rc_sequence_is_gapless_across_fifty_pushes() {
    let host = MockHost::new();
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    for n in 1..=50u64 {
        let outputs = router
            .dispatch(&push_context("release/v2.0", "branch", &format!("sha{}", n)))
            .unwrap();
        assert_eq!(outputs.tag, format!("v2.0.0-rc{}", n));
        assert_eq!(outputs.tag_type, TagType::Rc);
    }
}

#[test]
fn patch_sequence_is_gapless_after_ga() {
    let host = MockHost::new();
    host.add_tag("v2.0.0", "ga");
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    for n in 1..=50u64 {
        let outputs = router
            .dispatch(&push_context("release/v2.0", "branch", &format!("sha{}", n)))
            .unwrap();
        assert_eq!(outputs.tag, format!("v2.0.{}", n));
        assert_eq!(outputs.tag_type, TagType::Patch);
    }
}

#[test]
fn manual_ga_tag_push_moves_both_aliases() {
    let host = MockHost::new();
    host.add_tag("v1.1.0", "a0");
    host.add_tag("v1.1.1", "a1");
    host.add_tag("v1.2.0", "b0");
    host.set_branch_commits("release/v1.2", &["b0", "older"]);
    let mut inputs = inputs();
    inputs.aliases = true;
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("v1.2.0", "tag", "b0"))
        .unwrap();

    assert_eq!(outputs.tag_type, TagType::Ga);
    assert_eq!(host.tag_commit("v1"), Some("b0".to_string()));
    assert_eq!(host.tag_commit("v1.2"), Some("b0".to_string()));
}

#[test]
fn manual_patch_tag_in_lower_minor_moves_only_minor_alias() {
    let host = MockHost::new();
    host.add_tag("v1.1.0", "a0");
    host.add_tag("v1.1.4", "a4");
    host.add_tag("v1.2.0", "b0");
    host.set_branch_commits("release/v1.1", &["a4", "a0"]);
    let mut inputs = inputs();
    inputs.aliases = true;
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("v1.1.4", "tag", "a4"))
        .unwrap();

    assert_eq!(outputs.tag_type, TagType::Patch);
    // v1.2.0 is higher, so the major alias stays put
    assert_eq!(host.tag_commit("v1.1"), Some("a4".to_string()));
    assert_eq!(host.tag_commit("v1"), None);
}

#[test]
fn manual_rc_tag_push_is_recorded_without_alias_updates() {
    let host = MockHost::new();
    host.add_tag("v1.2.0-rc1", "c1");
    host.set_branch_commits("release/v1.2", &["c1"]);
    let mut inputs = inputs();
    inputs.aliases = true;
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("v1.2.0-rc1", "tag", "c1"))
        .unwrap();

    assert_eq!(outputs.tag_type, TagType::Rc);
    assert!(host.mutations().is_empty());
}

#[test]
fn manual_tag_unreachable_from_release_branch_is_fatal() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "elsewhere");
    host.set_branch_commits("release/v1.2", &["b0", "older"]);
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let result = router.dispatch(&push_context("v1.2.0", "tag", "elsewhere"));
    assert!(result.is_err());
}

#[test]
fn branch_lookup_failure_fails_closed() {
    let host = MockHost::new().fail_branch_lookups();
    host.add_tag("v1.2.0", "b0");
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let result = router.dispatch(&push_context("v1.2.0", "tag", "b0"));
    assert!(result.is_err());
}

#[test]
fn manual_tag_not_matching_grammar_is_skipped() {
    let host = MockHost::new();
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("nightly-2026-08-28", "tag", "sha"))
        .unwrap();
    assert_eq!(outputs.tag_type, TagType::Skipped);
}

#[test]
fn identical_prefixes_never_attempt_minor_alias() {
    // Branch prefix and tag prefix are both "v": the minor alias v1.2
    // would collide with the release branch ref v1.2.
    let host = MockHost::new();
    host.add_tag("v1.2.0", "b0");
    host.set_branch_commits("v1.2", &["b0"]);
    let mut inputs = inputs();
    inputs.aliases = true;
    inputs.release_prefix = "v".to_string();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("v1.2.0", "tag", "b0"))
        .unwrap();

    assert_eq!(outputs.tag_type, TagType::Ga);
    assert_eq!(host.tag_commit("v1"), Some("b0".to_string()));
    assert_eq!(host.tag_commit("v1.2"), None);
}

#[test]
fn workflow_dispatch_delegates_to_commit_push() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "ga");
    let mut inputs = inputs();
    inputs.target_branch = "release/v1.2".to_string();
    let router = Router::new(&host, &inputs).unwrap();

    let context = EventContext {
        event_name: "workflow_dispatch".to_string(),
        ref_name: "main".to_string(),
        ref_type: "branch".to_string(),
        sha: "sha9".to_string(),
        repository: "owner/repo".to_string(),
    };
    let outputs = router.dispatch(&context).unwrap();

    assert_eq!(outputs.tag, "v1.2.1");
    assert_eq!(outputs.tag_type, TagType::Patch);
}

#[test]
fn workflow_dispatch_with_bad_target_branch_is_fatal() {
    let host = MockHost::new();
    let mut inputs = inputs();
    inputs.target_branch = "main".to_string();
    let router = Router::new(&host, &inputs).unwrap();

    let context = EventContext {
        event_name: "workflow_dispatch".to_string(),
        ref_name: "main".to_string(),
        ref_type: "branch".to_string(),
        sha: "sha9".to_string(),
        repository: "owner/repo".to_string(),
    };
    assert!(router.dispatch(&context).is_err());
}

#[test]
fn dry_run_computes_tags_without_mutations() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "ga");
    let mut inputs = inputs();
    inputs.dry_run = true;
    inputs.aliases = true;
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("release/v1.2", "branch", "sha1"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.1");
    assert_eq!(outputs.tag_type, TagType::Patch);
    assert!(host.mutations().is_empty());
}

#[test]
fn unhandled_events_are_skipped() {
    let host = MockHost::new();
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    let context = EventContext {
        event_name: "pull_request".to_string(),
        ref_name: "release/v1.2".to_string(),
        ref_type: "branch".to_string(),
        sha: "sha1".to_string(),
        repository: "owner/repo".to_string(),
    };
    let outputs = router.dispatch(&context).unwrap();
    assert_eq!(outputs.tag_type, TagType::Skipped);
    assert!(outputs.tag.is_empty());
}

#[test]
fn custom_prefixes_flow_through_the_pipeline() {
    let host = MockHost::new();
    host.add_tag("rel-1.0.0-rc1", "sha1");
    let mut inputs = inputs();
    inputs.release_prefix = "maint/".to_string();
    inputs.tag_prefix = "rel-".to_string();
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("maint/1.0", "branch", "sha2"))
        .unwrap();

    assert_eq!(outputs.tag, "rel-1.0.0-rc2");
    assert_eq!(outputs.tag_type, TagType::Rc);
}

#[test]
fn alias_updates_are_skipped_when_disabled() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "ga");
    host.set_branch_commits("release/v1.2", &["ga"]);
    let inputs = inputs();
    let router = Router::new(&host, &inputs).unwrap();

    router.dispatch(&push_context("v1.2.0", "tag", "ga")).unwrap();
    assert_eq!(host.tag_commit("v1"), None);
    assert_eq!(host.tag_commit("v1.2"), None);
}

#[test]
fn commit_push_patch_with_aliases_creates_them() {
    let host = MockHost::new();
    host.add_tag("v1.2.0", "ga");
    let mut inputs = inputs();
    inputs.aliases = true;
    let router = Router::new(&host, &inputs).unwrap();

    let outputs = router
        .dispatch(&push_context("release/v1.2", "branch", "sha1"))
        .unwrap();

    assert_eq!(outputs.tag, "v1.2.1");
    assert_eq!(
        host.mutations(),
        vec![
            Mutation::Create {
                name: "v1.2.1".to_string(),
                commit: "sha1".to_string(),
                message: "Patch release v1.2.1".to_string(),
            },
            Mutation::Create {
                name: "v1.2".to_string(),
                commit: "sha1".to_string(),
                message: "Alias tag v1.2".to_string(),
            },
            Mutation::Create {
                name: "v1".to_string(),
                commit: "sha1".to_string(),
                message: "Alias tag v1".to_string(),
            },
        ]
    );
}
