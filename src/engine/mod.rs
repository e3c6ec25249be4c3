pub mod command;

use crate::error::UpstreamError;
use crate::SpellIssue;
use async_trait::async_trait;
use std::path::PathBuf;

pub use command::CommandEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOptions {
    /// Directory the files are relative to.
    pub root: PathBuf,
    /// Engine configuration file. `None` lets the engine discover its own.
    pub config: Option<PathBuf>,
}

/// Progress reported by an engine while it works through the files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintEvent {
    FileChecked { file: String, issues: usize },
    Issue(SpellIssue),
    /// The file could not be processed at all.
    Error { file: String, message: String },
}

/// A spell checker that can be pointed at a list of files.
#[async_trait]
pub trait SpellEngine: Send + Sync {
    async fn lint(
        &self,
        files: &[String],
        options: &LintOptions,
        on_event: &mut (dyn FnMut(LintEvent) + Send),
    ) -> Result<(), UpstreamError>;
}
