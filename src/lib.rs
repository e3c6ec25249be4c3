pub mod action;
pub mod check;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod files;
pub mod github;

#[cfg(test)]
mod testing;

pub use action::run_action;
pub use config::{RawParams, ValidatedParams};
pub use error::{ActionError, UpstreamError};
pub use event::EventEnv;

use files::FileSet;

/// Totals collected from one spell check pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub files: usize,
    pub issues: usize,
    /// Files the engine could not process.
    pub errors: usize,
    pub files_with_issues: FileSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellIssue {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub word: String,
    pub suggestions: Vec<String>,
}
