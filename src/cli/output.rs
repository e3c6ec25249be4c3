use crate::{CheckResult, SpellIssue};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Error,
    Warning,
}

impl fmt::Display for AnnotationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationLevel::Error => write!(f, "error"),
            AnnotationLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A message pinned to a location in a checked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub level: AnnotationLevel,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Annotation {
    pub fn for_issue(level: AnnotationLevel, issue: &SpellIssue) -> Self {
        Self {
            level,
            file: issue.file.clone(),
            line: issue.line,
            column: issue.column,
            message: issue_message(issue),
        }
    }
}

pub fn issue_message(issue: &SpellIssue) -> String {
    if issue.suggestions.is_empty() {
        format!("Unknown word ({})", issue.word)
    } else {
        let suggestions = issue
            .suggestions
            .iter()
            .take(5)
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Unknown word ({}) Suggestions: {}", issue.word, suggestions)
    }
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// `Files checked: 2, Issues found: 2 in 1 files.`
pub fn summary_line(result: &CheckResult) -> String {
    format!(
        "Files checked: {}, Issues found: {} in {} files.",
        result.files,
        result.issues,
        result.files_with_issues.len()
    )
}

/// Message used to mark the run failed in strict mode.
pub fn failure_message(result: &CheckResult) -> String {
    format!(
        "{} found in {} of the {} checked.",
        plural(result.issues, "spelling issue"),
        result.files_with_issues.len(),
        plural(result.files, "file")
    )
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Render a workflow command line such as `::debug::message`.
pub fn workflow_command(name: &str, properties: &[(&str, String)], message: &str) -> String {
    let properties = properties
        .iter()
        .map(|(key, value)| format!("{}={}", key, escape_property(value)))
        .collect::<Vec<_>>()
        .join(",");

    if properties.is_empty() {
        format!("::{}::{}", name, escape_data(message))
    } else {
        format!("::{} {}::{}", name, properties, escape_data(message))
    }
}

pub fn format_annotation(annotation: &Annotation) -> String {
    workflow_command(
        &annotation.level.to_string(),
        &[
            ("file", annotation.file.clone()),
            ("line", annotation.line.to_string()),
            ("col", annotation.column.to_string()),
        ],
        &annotation.message,
    )
}
