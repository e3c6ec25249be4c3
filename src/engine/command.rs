use super::{LintEvent, LintOptions, SpellEngine};
use crate::error::UpstreamError;
use crate::SpellIssue;
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_COMMAND: &str = "spellchk --format json --no-fail";
/// `spellchk` takes its extra word list through `--personal-dict`.
pub const DEFAULT_CONFIG_FLAG: &str = "--personal-dict";

#[derive(Debug, Deserialize)]
struct ReportedError {
    line: usize,
    column: usize,
    word: String,
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    errors: Vec<ReportedError>,
}

/// Collect the JSON reports at the head of the engine output. Anything after
/// them (e.g. a human readable summary) is ignored.
fn parse_reports(stdout: &str) -> Vec<Report> {
    serde_json::Deserializer::from_str(stdout)
        .into_iter::<Report>()
        .map_while(Result::ok)
        .collect()
}

/// Runs an external spell checker once per file and reads its JSON report.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    config_flag: String,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            config_flag: DEFAULT_CONFIG_FLAG.to_string(),
        }
    }

    /// Build from a whitespace separated command line such as
    /// `spellchk --format json --no-fail`. A blank line means the default.
    pub fn from_command_line(line: &str) -> Self {
        let mut parts = line.split_whitespace().map(str::to_string);
        match parts.next() {
            Some(program) => Self::new(program, parts.collect()),
            None => Self::from_command_line(DEFAULT_COMMAND),
        }
    }

    /// Flag placed before the configuration path. Blank keeps the current one.
    pub fn with_config_flag(mut self, flag: &str) -> Self {
        if !flag.trim().is_empty() {
            self.config_flag = flag.trim().to_string();
        }
        self
    }

    fn arguments(&self, file: &str, config: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if let Some(config) = config {
            args.push(OsString::from(&self.config_flag));
            args.push(config.as_os_str().to_owned());
        }
        args.push(OsString::from(file));
        args
    }

    fn command_for(&self, file: &str, root: &Path, config: Option<&Path>) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(self.arguments(file, config))
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

#[async_trait]
impl SpellEngine for CommandEngine {
    async fn lint(
        &self,
        files: &[String],
        options: &LintOptions,
        on_event: &mut (dyn FnMut(LintEvent) + Send),
    ) -> Result<(), UpstreamError> {
        // The engine runs inside `root`, so a relative config must be anchored first.
        let config: Option<PathBuf> = match &options.config {
            Some(path) if path.is_relative() => Some(std::env::current_dir()?.join(path)),
            other => other.clone(),
        };

        for file in files {
            log::debug!(
                "running {} {} on {}",
                self.program,
                self.args.join(" "),
                file
            );

            let output = self
                .command_for(file, &options.root, config.as_deref())
                .output()
                .await
                .map_err(|source| UpstreamError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;

            let reports = parse_reports(&String::from_utf8_lossy(&output.stdout));
            if !output.status.success() || reports.is_empty() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let message = match stderr.trim() {
                    "" => format!("Spell checker produced no report ({})", output.status),
                    text => text.to_string(),
                };
                on_event(LintEvent::Error {
                    file: file.clone(),
                    message,
                });
                on_event(LintEvent::FileChecked {
                    file: file.clone(),
                    issues: 0,
                });
                continue;
            }

            let mut issues = 0;
            for error in reports.into_iter().flat_map(|report| report.errors) {
                issues += 1;
                on_event(LintEvent::Issue(SpellIssue {
                    file: file.clone(),
                    line: error.line,
                    column: error.column,
                    word: error.word,
                    suggestions: error.suggestions,
                }));
            }
            on_event(LintEvent::FileChecked {
                file: file.clone(),
                issues,
            });
        }

        Ok(())
    }
}
