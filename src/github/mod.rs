//! Git-hosting collaborator abstraction.
//!
//! The decision engine only ever talks to the hosting platform through the
//! [GitHost] trait, so the pure classification/sequencing/alias logic can be
//! exercised against [mock::MockHost] without any network access. The real
//! implementation is [client::GitHubClient] over the GitHub REST API.
//!
//! The engine performs no retries: collaborator failures propagate to the
//! caller as-is. Concurrent invocations racing to create the same tag are
//! arbitrated by the platform's atomic ref creation, not by this layer.

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::MockHost;

use crate::domain::TagRecord;
use crate::error::Result;

/// Tag and branch operations the engine needs from the hosting platform.
///
/// `list_tags` may be expensive; the router calls it once per invocation and
/// passes the snapshot into the pure decision functions.
pub trait GitHost: Send + Sync {
    /// Full, unfiltered tag listing
    fn list_tags(&self) -> Result<Vec<TagRecord>>;

    /// Whether a tag ref exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create an annotated tag at a commit; fails on conflict or auth error
    fn create_tag(&self, name: &str, commit: &str, message: &str) -> Result<()>;

    /// Force-move an existing tag ref to a new commit
    fn force_move_tag(&self, name: &str, commit: &str) -> Result<()>;

    /// Commit ids reachable from a branch head, newest first
    fn branch_commits(&self, branch_name: &str) -> Result<Vec<String>>;
}
