//! GitHub REST implementation of the hosting collaborator.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::TagRecord;
use crate::error::{ReleaseTaggerError, Result};
use crate::github::GitHost;

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "release-tagger";
const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TagObject {
    sha: String,
}

/// GitHub REST API client for one repository.
///
/// All calls are synchronous; the engine is single-threaded and each CI
/// invocation runs in its own process.
pub struct GitHubClient {
    agent: ureq::Agent,
    token: String,
    repository: String,
    api_root: String,
}

impl GitHubClient {
    /// Create a client for `owner/repo` authenticating with `token`
    pub fn new(token: impl Into<String>, repository: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(15))
            .build();
        GitHubClient {
            agent,
            token: token.into(),
            repository: repository.into(),
            api_root: API_ROOT.to_string(),
        }
    }

    /// Point the client at a non-default API root (proxies, GHES)
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}{}", self.api_root, self.repository, path)
    }

    fn get(&self, url: &str) -> std::result::Result<ureq::Response, Box<ureq::Error>> {
        self.agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/vnd.github+json")
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()
            .map_err(Box::new)
    }

    fn send_json(
        &self,
        method: &str,
        url: &str,
        body: serde_json::Value,
    ) -> Result<ureq::Response> {
        self.agent
            .request(method, url)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/vnd.github+json")
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(body)
            .map_err(|e| ReleaseTaggerError::Transport(Box::new(e)))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, resp: ureq::Response) -> Result<T> {
        resp.into_json::<T>().map_err(|e| {
            ReleaseTaggerError::api(format!("Cannot parse GitHub response: {}", e))
        })
    }
}

impl GitHost for GitHubClient {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let url = format!(
                "{}?per_page={}&page={}",
                self.url("/tags"),
                PER_PAGE,
                page
            );
            let resp = self.get(&url).map_err(ReleaseTaggerError::Transport)?;
            let entries: Vec<TagEntry> = self.read_json(resp)?;
            let count = entries.len();
            records.extend(
                entries
                    .into_iter()
                    .map(|entry| TagRecord::new(entry.name, entry.commit.sha)),
            );
            if count < PER_PAGE {
                return Ok(records);
            }
            page += 1;
        }
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let url = self.url(&format!("/git/ref/tags/{}", name));
        match self.get(&url) {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.as_ref(), ureq::Error::Status(404, _)) => Ok(false),
            Err(err) => Err(ReleaseTaggerError::Transport(err)),
        }
    }

    fn create_tag(&self, name: &str, commit: &str, message: &str) -> Result<()> {
        // Annotated tag: create the tag object, then the ref pointing at it
        let resp = self.send_json(
            "POST",
            &self.url("/git/tags"),
            serde_json::json!({
                "tag": name,
                "message": message,
                "object": commit,
                "type": "commit",
            }),
        )?;
        let object: TagObject = self.read_json(resp)?;

        self.send_json(
            "POST",
            &self.url("/git/refs"),
            serde_json::json!({
                "ref": format!("refs/tags/{}", name),
                "sha": object.sha,
            }),
        )?;
        Ok(())
    }

    fn force_move_tag(&self, name: &str, commit: &str) -> Result<()> {
        self.send_json(
            "PATCH",
            &self.url(&format!("/git/refs/tags/{}", name)),
            serde_json::json!({
                "sha": commit,
                "force": true,
            }),
        )?;
        Ok(())
    }

    fn branch_commits(&self, branch_name: &str) -> Result<Vec<String>> {
        let mut shas = Vec::new();
        let mut page = 1;
        loop {
            let url = format!(
                "{}?sha={}&per_page={}&page={}",
                self.url("/commits"),
                branch_name,
                PER_PAGE,
                page
            );
            let resp = self.get(&url).map_err(ReleaseTaggerError::Transport)?;
            let entries: Vec<CommitEntry> = self.read_json(resp)?;
            let count = entries.len();
            shas.extend(entries.into_iter().map(|entry| entry.sha));
            if count < PER_PAGE {
                return Ok(shas);
            }
            page += 1;
        }
    }
}
