//! Runs one action invocation from raw inputs to the final verdict.
//!
//! The run moves through validation, file resolution, checking and
//! reporting. Fatal problems end it with an [`ActionError`]; spelling issues
//! never do.

use crate::check::{check_spelling, CheckOptions};
use crate::cli::host::CiHost;
use crate::cli::output::{failure_message, summary_line};
use crate::config::{validate_params, RawParams};
use crate::engine::SpellEngine;
use crate::error::{ActionError, Result, UpstreamError};
use crate::event::{resolve_event_files, EventContext, EventEnv};
use crate::files::{filter_files, parse_file_list, FileSet};
use crate::github::GitHubClient;
use crate::CheckResult;
use serde_json::Value;

/// Derive the file list: from the event when `use_event_files` is set,
/// otherwise from the literal list in `files`.
pub async fn gather_files(
    context: &EventContext,
    github: &dyn GitHubClient,
    host: &dyn CiHost,
) -> Result<FileSet> {
    if !context.use_event_files {
        return Ok(parse_file_list(&context.files));
    }

    let kind = context.event_kind()?;
    let repo = context.repo()?;
    host.debug(&format!("Looking up files changed by {} in {}", kind, repo));

    let payload = context.payload.load().await?;
    let files = resolve_event_files(kind, &payload, &repo, github).await?;
    filter_files(&context.files, files)
}

fn set_output(host: &dyn CiHost, name: &str, value: &str) -> Result<()> {
    host.set_output(name, value)
        .map_err(|e| ActionError::from(UpstreamError::from(e)))
}

fn publish_outputs(host: &dyn CiHost, result: &CheckResult, success: bool) -> Result<()> {
    let files_with_issues = Value::from(
        result
            .files_with_issues
            .iter()
            .cloned()
            .collect::<Vec<_>>(),
    );

    set_output(host, "success", &success.to_string())?;
    set_output(host, "number_of_files_checked", &result.files.to_string())?;
    set_output(host, "number_of_issues", &result.issues.to_string())?;
    set_output(
        host,
        "number_of_files_with_issues",
        &result.files_with_issues.len().to_string(),
    )?;
    set_output(host, "files_with_issues", &files_with_issues.to_string())
}

/// Summarise the result and mark the run failed in strict mode.
///
/// The returned flag is `true` only when there were no issues and no errors,
/// whatever `strict` says; `strict` only decides whether the host run is
/// marked failed.
pub fn report_result(result: &CheckResult, strict: bool, host: &dyn CiHost) -> Result<bool> {
    host.info(&summary_line(result));

    if strict && result.issues > 0 {
        host.set_failed(&failure_message(result));
    }

    let success = result.issues + result.errors == 0;
    publish_outputs(host, result, success)?;
    Ok(success)
}

/// Execute the action against the given collaborators.
pub async fn run_action(
    raw: RawParams,
    env: &EventEnv,
    github: &dyn GitHubClient,
    engine: &dyn SpellEngine,
    host: &dyn CiHost,
) -> Result<bool> {
    let params = validate_params(raw, host).await?;
    host.debug(&format!(
        "event={} incremental_files_only={} inline={} strict={}",
        env.event_name, params.incremental_files_only, params.inline, params.strict
    ));

    let context = EventContext::new(env, &params);
    let files = gather_files(&context, github, host).await?;
    host.debug(&format!("Checking {} files", files.len()));

    let options = CheckOptions {
        root: params.root.clone(),
        config: params.config.clone(),
        inline: params.inline,
    };

    match check_spelling(&files, &options, engine, host).await? {
        Some(result) => report_result(&result, params.strict, host),
        None => {
            host.info("No files to check.");
            publish_outputs(host, &CheckResult::default(), true)?;
            Ok(true)
        }
    }
}
