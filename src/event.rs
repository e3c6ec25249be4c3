use crate::config::ValidatedParams;
use crate::error::{ActionError, Result, UpstreamError};
use crate::files::FileSet;
use crate::github::{GitHubClient, RepoRef};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Events that can drive incremental checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
}

impl FromStr for EventKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(EventKind::Push),
            "pull_request" => Ok(EventKind::PullRequest),
            other => Err(ActionError::UnsupportedEvent(other.to_string())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Push => write!(f, "push"),
            EventKind::PullRequest => write!(f, "pull_request"),
        }
    }
}

/// Where the event payload comes from. Files are only read on demand, so a
/// run that never looks at the event never fails on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventPayload {
    #[default]
    Empty,
    Json(Value),
    File(PathBuf),
}

impl EventPayload {
    pub async fn load(&self) -> Result<Value> {
        match self {
            EventPayload::Empty => Ok(Value::Null),
            EventPayload::Json(value) => Ok(value.clone()),
            EventPayload::File(path) => {
                log::debug!("reading event payload from {}", path.display());
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(UpstreamError::from)?;
                serde_json::from_str(&content).map_err(ActionError::EventPayload)
            }
        }
    }
}

/// What the runner tells us about the triggering event.
#[derive(Debug, Clone, Default)]
pub struct EventEnv {
    pub event_name: String,
    pub payload: EventPayload,
    pub repository: String,
}

impl EventEnv {
    /// A missing payload path yields an empty payload.
    pub fn new(event_name: &str, payload_path: Option<PathBuf>, repository: &str) -> Self {
        Self {
            event_name: event_name.trim().to_string(),
            payload: payload_path.map_or(EventPayload::Empty, EventPayload::File),
            repository: repository.trim().to_string(),
        }
    }
}

/// Everything needed to derive the file list for one run.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub event_name: String,
    pub payload: EventPayload,
    pub repository: String,
    pub files: String,
    pub use_event_files: bool,
}

impl EventContext {
    pub fn new(env: &EventEnv, params: &ValidatedParams) -> Self {
        Self {
            event_name: env.event_name.clone(),
            payload: env.payload.clone(),
            repository: env.repository.clone(),
            files: params.files.clone(),
            use_event_files: params.incremental_files_only,
        }
    }

    pub fn event_kind(&self) -> Result<EventKind> {
        self.event_name.parse()
    }

    pub fn repo(&self) -> Result<RepoRef> {
        self.repository.parse()
    }
}

#[derive(Debug, Default, Deserialize)]
struct PushPayload {
    #[serde(default)]
    commits: Option<Vec<PushCommit>>,
}

#[derive(Debug, Deserialize)]
struct PushCommit {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    #[serde(default)]
    number: Option<u64>,
}

fn parse_payload<T: Default + serde::de::DeserializeOwned>(payload: &Value) -> Result<T> {
    if payload.is_null() {
        return Ok(T::default());
    }
    T::deserialize(payload).map_err(ActionError::EventPayload)
}

/// Ask GitHub which files the event touched.
pub async fn resolve_event_files(
    kind: EventKind,
    payload: &Value,
    repo: &RepoRef,
    github: &dyn GitHubClient,
) -> Result<FileSet> {
    match kind {
        EventKind::Push => {
            let push: PushPayload = parse_payload(payload)?;
            let commits = push.commits.unwrap_or_default();

            let mut files = FileSet::new();
            for id in commits.iter().filter_map(|commit| commit.id.as_deref()) {
                files.extend(github.files_for_commit(repo, id).await?);
            }
            Ok(files)
        }
        EventKind::PullRequest => {
            let pull: PullRequestPayload = parse_payload(payload)?;
            match pull.pull_request.and_then(|pr| pr.number) {
                Some(number) => Ok(github.files_for_pull_request(repo, number).await?),
                None => Ok(FileSet::new()),
            }
        }
    }
}
