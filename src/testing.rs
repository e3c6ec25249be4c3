//! In-memory collaborators for unit tests.

use crate::cli::host::CiHost;
use crate::cli::output::Annotation;
use crate::engine::{LintEvent, LintOptions, SpellEngine};
use crate::error::UpstreamError;
use crate::files::FileSet;
use crate::github::{GitHubClient, RepoRef};
use crate::SpellIssue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeGitHub {
    commits: HashMap<String, FileSet>,
    pulls: HashMap<u64, FileSet>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

fn file_set(files: &[&str]) -> FileSet {
    files.iter().map(|f| f.to_string()).collect()
}

impl FakeGitHub {
    pub fn with_commit(mut self, sha: &str, files: &[&str]) -> Self {
        self.commits.insert(sha.to_string(), file_set(files));
        self
    }

    pub fn with_pull_request(mut self, number: u64, files: &[&str]) -> Self {
        self.pulls.insert(number, file_set(files));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.fail {
            return Err(UpstreamError::Status {
                status: 502,
                url: call,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubClient for FakeGitHub {
    async fn files_for_commit(&self, _repo: &RepoRef, sha: &str) -> Result<FileSet, UpstreamError> {
        self.record(format!("commit:{}", sha))?;
        Ok(self.commits.get(sha).cloned().unwrap_or_default())
    }

    async fn files_for_pull_request(
        &self,
        _repo: &RepoRef,
        number: u64,
    ) -> Result<FileSet, UpstreamError> {
        self.record(format!("pull_request:{}", number))?;
        Ok(self.pulls.get(&number).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    issues: Vec<(String, String)>,
    errors: Vec<(String, String)>,
    fail: bool,
    linted: Mutex<Vec<(Vec<String>, LintOptions)>>,
}

impl FakeEngine {
    pub fn with_issue(mut self, file: &str, word: &str) -> Self {
        self.issues.push((file.to_string(), word.to_string()));
        self
    }

    pub fn with_error(mut self, file: &str, message: &str) -> Self {
        self.errors.push((file.to_string(), message.to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn linted(&self) -> Vec<(Vec<String>, LintOptions)> {
        self.linted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpellEngine for FakeEngine {
    async fn lint(
        &self,
        files: &[String],
        options: &LintOptions,
        on_event: &mut (dyn FnMut(LintEvent) + Send),
    ) -> Result<(), UpstreamError> {
        self.linted
            .lock()
            .unwrap()
            .push((files.to_vec(), options.clone()));
        if self.fail {
            return Err(UpstreamError::Spawn {
                program: "fake-engine".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            });
        }

        for file in files {
            for (_, message) in self.errors.iter().filter(|(f, _)| f == file) {
                on_event(LintEvent::Error {
                    file: file.clone(),
                    message: message.clone(),
                });
            }

            let mut issues = 0;
            for (_, word) in self.issues.iter().filter(|(f, _)| f == file) {
                issues += 1;
                on_event(LintEvent::Issue(SpellIssue {
                    file: file.clone(),
                    line: issues,
                    column: 1,
                    word: word.clone(),
                    suggestions: vec![],
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

#[derive(Debug, Default)]
pub struct MemoryHost {
    infos: Mutex<Vec<String>>,
    debugs: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    annotations: Mutex<Vec<Annotation>>,
    outputs: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<String>>,
}

impl MemoryHost {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn debugs(&self) -> Vec<String> {
        self.debugs.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.lock().unwrap().clone()
    }

    /// Latest value written for `name`.
    pub fn output(&self, name: &str) -> Option<String> {
        self.outputs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn failure(&self) -> Option<String> {
        self.failure.lock().unwrap().clone()
    }
}

impl CiHost for MemoryHost {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn debug(&self, message: &str) {
        self.debugs.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn annotate(&self, annotation: &Annotation) {
        self.annotations.lock().unwrap().push(annotation.clone());
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        self.outputs
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.failure
            .lock()
            .unwrap()
            .get_or_insert_with(|| message.to_string());
    }

    fn has_failed(&self) -> bool {
        self.failure.lock().unwrap().is_some()
    }
}
