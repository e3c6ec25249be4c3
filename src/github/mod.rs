pub mod rest;

use crate::error::{ActionError, UpstreamError};
use crate::files::FileSet;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub use rest::GitHubRestClient;

/// Repository coordinates, as found in `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoRef {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ActionError::configuration(format!(
                "Invalid repository '{}', expected owner/name (GITHUB_REPOSITORY)",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The slice of the GitHub API needed to find the files touched by an event.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    async fn files_for_commit(&self, repo: &RepoRef, sha: &str) -> Result<FileSet, UpstreamError>;

    /// All files of the pull request, across every page.
    async fn files_for_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<FileSet, UpstreamError>;
}
