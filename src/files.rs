use crate::error::{ActionError, Result};
use ignore::overrides::OverrideBuilder;
use std::collections::BTreeSet;

/// Unique file paths, relative to the repository root.
pub type FileSet = BTreeSet<String>;

/// Parse a newline separated list of paths, dropping blank lines.
pub fn parse_file_list(files: &str) -> FileSet {
    files
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only the files matching the include pattern.
///
/// The pattern may hold several globs, one per line; a file is kept when any
/// of them matches. An empty pattern keeps everything.
///
/// Globs follow gitignore rules: one without a `/` (such as `*.md`) matches
/// the file name at any depth, a bare directory name (`docs`) does not match
/// the files below it (use `docs/**`), and `!glob` drops files an earlier
/// glob kept. A pattern made only of `!` globs keeps nothing.
pub fn filter_files(pattern: &str, files: FileSet) -> Result<FileSet> {
    let globs: Vec<&str> = pattern
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if globs.is_empty() {
        return Ok(files);
    }

    let mut builder = OverrideBuilder::new(".");
    for glob in &globs {
        builder.add(glob).map_err(|e| {
            ActionError::configuration(format!("Invalid files pattern '{}': {}", glob, e))
        })?;
    }
    let matcher = builder
        .build()
        .map_err(|e| ActionError::configuration(format!("Invalid files pattern: {}", e)))?;

    Ok(files
        .into_iter()
        .filter(|file| matcher.matched(file, false).is_whitelist())
        .collect())
}
