//! Action inputs and event context.
//!
//! Inputs follow the GitHub Actions convention: CLI flags take precedence,
//! `INPUT_*` environment variables are the defaults. The event context comes
//! from the standard `GITHUB_*` variables.

use crate::error::{ReleaseTaggerError, Result};
use crate::grammar;

pub const DEFAULT_RELEASE_PREFIX: &str = "release/v";
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Resolved action inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub token: String,
    pub debug: bool,
    pub dry_run: bool,
    pub target_branch: String,
    pub aliases: bool,
    pub release_prefix: String,
    pub tag_prefix: String,
}

impl ActionInputs {
    /// Validate the inputs that must be correct before any repository access.
    ///
    /// Fails on a missing token or on a prefix that is empty or contains a
    /// substring git forbids in ref names.
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(ReleaseTaggerError::config(
                "GitHub token is required. Set INPUT_TOKEN or GITHUB_TOKEN.",
            ));
        }
        for (label, prefix) in [
            ("release-prefix", &self.release_prefix),
            ("tag-prefix", &self.tag_prefix),
        ] {
            if !grammar::validate_prefix(prefix) {
                return Err(ReleaseTaggerError::config(format!(
                    "Invalid {} '{}': must be non-empty and not contain \
                     invalid git ref characters (.. ~ ^ : \\ space tab newline * ? [)",
                    label, prefix
                )));
            }
        }
        Ok(())
    }
}

/// GitHub event context from environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub event_name: String,
    pub ref_name: String,
    pub ref_type: String,
    pub sha: String,
    pub repository: String,
}

impl EventContext {
    /// Read the event context from the standard `GITHUB_*` variables
    pub fn from_env() -> Self {
        EventContext {
            event_name: env_or_empty("GITHUB_EVENT_NAME"),
            ref_name: env_or_empty("GITHUB_REF_NAME"),
            ref_type: env_or_empty("GITHUB_REF_TYPE"),
            sha: env_or_empty("GITHUB_SHA"),
            repository: env_or_empty("GITHUB_REPOSITORY"),
        }
    }
}

/// Read a string input variable, empty when unset
pub fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Read a string input variable with a fallback default
pub fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read a boolean input variable; only case-insensitive "true" enables it
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
