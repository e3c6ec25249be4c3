use super::{GitHubClient, RepoRef};
use crate::error::UpstreamError;
use crate::files::FileSet;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("spellchk-action/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ChangedFile {
    filename: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    files: Vec<ChangedFile>,
}

/// Removed files cannot be checked, so they never enter the file set.
fn changed_paths(entries: Vec<ChangedFile>) -> impl Iterator<Item = String> {
    entries
        .into_iter()
        .filter(|entry| entry.status != "removed")
        .map(|entry| entry.filename)
}

/// GitHub REST v3 client.
pub struct GitHubRestClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubRestClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let api_url = match api_url.trim() {
            "" => DEFAULT_API_URL,
            url => url,
        };

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    fn commit_url(&self, repo: &RepoRef, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_url, repo.owner, repo.name, sha
        )
    }

    fn pull_request_files_url(&self, repo: &RepoRef, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.api_url, repo.owner, repo.name, number
        )
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str, page: usize) -> Result<T, UpstreamError> {
        log::debug!("GET {} (page {})", url, page);

        let mut request = self
            .http
            .get(url)
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GitHubClient for GitHubRestClient {
    async fn files_for_commit(&self, repo: &RepoRef, sha: &str) -> Result<FileSet, UpstreamError> {
        let url = self.commit_url(repo, sha);
        let mut files = FileSet::new();
        let mut page = 1;

        loop {
            let commit: CommitResponse = self.get_page(&url, page).await?;
            let count = commit.files.len();
            files.extend(changed_paths(commit.files));
            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        log::debug!("commit {} touched {} files", sha, files.len());
        Ok(files)
    }

    async fn files_for_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<FileSet, UpstreamError> {
        let url = self.pull_request_files_url(repo, number);
        let mut files = FileSet::new();
        let mut page = 1;

        loop {
            let entries: Vec<ChangedFile> = self.get_page(&url, page).await?;
            let count = entries.len();
            files.extend(changed_paths(entries));
            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        log::debug!("pull request #{} touched {} files", number, files.len());
        Ok(files)
    }
}
