use thiserror::Error;

/// Fatal failures that abort an action run.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid action parameters:\n  {}", .0.join("\n  "))]
    Configuration(Vec<String>),

    #[error("Unsupported event: '{0}'. incremental_files_only requires a push or pull_request event.")]
    UnsupportedEvent(String),

    #[error("Failed to parse event payload: {0}")]
    EventPayload(#[source] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ActionError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ActionError::Configuration(vec![message.into()])
    }
}

/// Failures reported by the collaborators: the GitHub API, the spell check
/// engine process and the filesystem.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("GitHub API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to run spell checker '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ActionError> = std::result::Result<T, E>;
