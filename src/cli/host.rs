use super::output::{format_annotation, workflow_command, Annotation, AnnotationLevel};
use colored::*;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// The CI run as seen from the action: log lines, annotations, step outputs
/// and the failed flag.
pub trait CiHost: Send + Sync {
    fn info(&self, message: &str);

    fn debug(&self, message: &str);

    fn error(&self, message: &str);

    fn annotate(&self, annotation: &Annotation);

    fn set_output(&self, name: &str, value: &str) -> io::Result<()>;

    /// Mark the run as failed. Processing continues.
    fn set_failed(&self, message: &str);

    fn has_failed(&self) -> bool;
}

/// Talks to the Actions runner through workflow commands on stdout and the
/// `GITHUB_OUTPUT` file.
#[derive(Debug, Default)]
pub struct GitHubActionsHost {
    output_file: Option<PathBuf>,
    failed: AtomicBool,
}

impl GitHubActionsHost {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            failed: AtomicBool::new(false),
        }
    }
}

fn output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("spellchk_action_{}", std::process::id());
        format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
        format!("{}={}\n", name, value)
    }
}

impl CiHost for GitHubActionsHost {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn debug(&self, message: &str) {
        println!("{}", workflow_command("debug", &[], message));
    }

    fn error(&self, message: &str) {
        println!("{}", workflow_command("error", &[], message));
    }

    fn annotate(&self, annotation: &Annotation) {
        println!("{}", format_annotation(annotation));
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        let Some(path) = &self.output_file else {
            log::warn!("GITHUB_OUTPUT is not set, dropping output '{}'", name);
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(output_entry(name, value).as_bytes())
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.error(message);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Human readable output for running the action outside of GitHub.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    colored: bool,
    failed: AtomicBool,
}

impl ConsoleHost {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            failed: AtomicBool::new(false),
        }
    }
}

impl CiHost for ConsoleHost {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "error:".red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }

    fn annotate(&self, annotation: &Annotation) {
        let location = format!(
            "{}:{}:{}",
            annotation.file, annotation.line, annotation.column
        );

        if self.colored {
            let level = match annotation.level {
                AnnotationLevel::Error => annotation.level.to_string().red().bold(),
                AnnotationLevel::Warning => annotation.level.to_string().yellow().bold(),
            };
            println!("{} {} {}", location.blue().bold(), level, annotation.message);
        } else {
            println!("{} {} {}", location, annotation.level, annotation.message);
        }
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        log::info!("output {}={}", name, value);
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        if self.colored {
            eprintln!("{} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("✗ {}", message);
        }
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}
