//! In-memory hosting collaborator for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::TagRecord;
use crate::error::{ReleaseTaggerError, Result};
use crate::github::GitHost;

/// A tag mutation performed through the mock, recorded for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create {
        name: String,
        commit: String,
        message: String,
    },
    ForceMove {
        name: String,
        commit: String,
    },
}

#[derive(Default)]
struct MockState {
    tags: Vec<TagRecord>,
    branches: HashMap<String, Vec<String>>,
    mutations: Vec<Mutation>,
}

/// Mock host for testing without network access.
///
/// Tag mutations are applied to the in-memory listing and recorded in a
/// mutation log, so tests can assert both the resulting state and the exact
/// sequence of collaborator calls.
#[derive(Default)]
pub struct MockHost {
    state: Mutex<MockState>,
    fail_branch_lookup: bool,
}

impl MockHost {
    /// Create an empty mock host
    pub fn new() -> Self {
        MockHost::default()
    }

    /// Add a tag to the listing
    pub fn add_tag(&self, name: impl Into<String>, commit: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.tags.push(TagRecord::new(name, commit));
    }

    /// Set the commit history of a branch (newest first)
    pub fn set_branch_commits(&self, branch: impl Into<String>, commits: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.branches.insert(
            branch.into(),
            commits.iter().map(|sha| sha.to_string()).collect(),
        );
    }

    /// Make every branch lookup fail, to exercise fail-closed paths
    pub fn fail_branch_lookups(mut self) -> Self {
        self.fail_branch_lookup = true;
        self
    }

    /// Mutations performed so far, in call order
    pub fn mutations(&self) -> Vec<Mutation> {
        self.state.lock().unwrap().mutations.clone()
    }

    /// Commit a tag currently points at, if it exists
    pub fn tag_commit(&self, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.commit.clone())
    }
}

impl GitHost for MockHost {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        Ok(self.state.lock().unwrap().tags.clone())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.tags.iter().any(|tag| tag.name == name))
    }

    fn create_tag(&self, name: &str, commit: &str, message: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.tags.iter().any(|tag| tag.name == name) {
            return Err(ReleaseTaggerError::api(format!(
                "Reference already exists: refs/tags/{}",
                name
            )));
        }
        state.tags.push(TagRecord::new(name, commit));
        state.mutations.push(Mutation::Create {
            name: name.to_string(),
            commit: commit.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn force_move_tag(&self, name: &str, commit: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.tags.iter_mut().find(|tag| tag.name == name) {
            Some(tag) => tag.commit = commit.to_string(),
            None => {
                return Err(ReleaseTaggerError::api(format!(
                    "Reference does not exist: refs/tags/{}",
                    name
                )))
            }
        }
        state.mutations.push(Mutation::ForceMove {
            name: name.to_string(),
            commit: commit.to_string(),
        });
        Ok(())
    }

    fn branch_commits(&self, branch_name: &str) -> Result<Vec<String>> {
        if self.fail_branch_lookup {
            return Err(ReleaseTaggerError::api("branch lookup failed"));
        }
        let state = self.state.lock().unwrap();
        state
            .branches
            .get(branch_name)
            .cloned()
            .ok_or_else(|| ReleaseTaggerError::api(format!("Branch not found: {}", branch_name)))
    }
}
