use crate::cli::host::CiHost;
use crate::cli::output::{Annotation, AnnotationLevel};
use crate::config::InlineLevel;
use crate::engine::{LintEvent, LintOptions, SpellEngine};
use crate::error::{Result, UpstreamError};
use crate::files::FileSet;
use crate::CheckResult;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Defaults to the current directory.
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub inline: InlineLevel,
}

fn annotation_level(inline: InlineLevel) -> Option<AnnotationLevel> {
    match inline {
        InlineLevel::Error => Some(AnnotationLevel::Error),
        InlineLevel::Warning => Some(AnnotationLevel::Warning),
        InlineLevel::None => None,
    }
}

/// Run the engine over `files` and tally what it reports.
///
/// Returns `None` when there is nothing to check.
pub async fn check_spelling(
    files: &FileSet,
    options: &CheckOptions,
    engine: &dyn SpellEngine,
    host: &dyn CiHost,
) -> Result<Option<CheckResult>> {
    if files.is_empty() {
        return Ok(None);
    }

    let root = match &options.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().map_err(UpstreamError::from)?,
    };
    let lint_options = LintOptions {
        root,
        config: options.config.clone(),
    };
    let level = annotation_level(options.inline);
    let files: Vec<String> = files.iter().cloned().collect();
    let total = files.len();

    let mut result = CheckResult::default();
    let mut on_event = |event: LintEvent| match event {
        LintEvent::FileChecked { file, issues } => {
            result.files += 1;
            host.debug(&format!(
                "{}/{} {} ({} issues)",
                result.files, total, file, issues
            ));
        }
        LintEvent::Issue(issue) => {
            result.issues += 1;
            result.files_with_issues.insert(issue.file.clone());
            if let Some(level) = level {
                host.annotate(&Annotation::for_issue(level, &issue));
            }
        }
        LintEvent::Error { file, message } => {
            result.errors += 1;
            host.error(&format!("Failed to check {}: {}", file, message));
        }
    };

    engine.lint(&files, &lint_options, &mut on_event).await?;

    Ok(Some(result))
}
