use crate::cli::host::CiHost;
use crate::error::{ActionError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Action inputs exactly as the runner hands them over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParams {
    pub github_token: String,
    pub files: String,
    pub incremental_files_only: String,
    pub config: String,
    pub root: String,
    pub inline: String,
    pub strict: String,
}

impl Default for RawParams {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            files: String::new(),
            incremental_files_only: "true".to_string(),
            config: String::new(),
            root: String::new(),
            inline: InlineLevel::Warning.to_string(),
            strict: "true".to_string(),
        }
    }
}

impl RawParams {
    /// Empty inputs that have a default are treated as unset.
    fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.incremental_files_only.trim().is_empty() {
            self.incremental_files_only = defaults.incremental_files_only;
        }
        if self.inline.trim().is_empty() {
            self.inline = defaults.inline;
        }
        if self.strict.trim().is_empty() {
            self.strict = defaults.strict;
        }
        self
    }
}

/// Severity used for per-issue annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineLevel {
    Error,
    Warning,
    None,
}

impl FromStr for InlineLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(InlineLevel::Error),
            "warning" => Ok(InlineLevel::Warning),
            "none" => Ok(InlineLevel::None),
            _ => Err(format!(
                "Invalid inline level '{}', must be one of (error, warning, none)",
                s
            )),
        }
    }
}

impl fmt::Display for InlineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineLevel::Error => write!(f, "error"),
            InlineLevel::Warning => write!(f, "warning"),
            InlineLevel::None => write!(f, "none"),
        }
    }
}

/// Inputs after validation. Only produced by [`validate_params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedParams {
    pub github_token: String,
    pub files: String,
    pub incremental_files_only: bool,
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub inline: InlineLevel,
    pub strict: bool,
}

/// Map the accepted spellings of a boolean onto `"true"` / `"false"`.
/// Anything else is returned unchanged.
pub fn normalize_bool(value: &str) -> String {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" | "1" => "true".to_string(),
        "false" | "f" | "0" => "false".to_string(),
        _ => value.to_string(),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match normalize_bool(value).as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "Invalid {} setting '{}', must be one of (true, false)",
            name, value
        )),
    }
}

fn parse_token(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("GitHub token is required (github_token).".to_string())
    } else {
        Ok(value.trim().to_string())
    }
}

async fn existing_path(name: &str, value: &str) -> Result<Option<PathBuf>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(value);
    match tokio::fs::try_exists(&path).await {
        Ok(true) => Ok(Some(path)),
        Ok(false) => Err(format!("The {} path does not exist: \"{}\"", name, value)),
        Err(e) => Err(format!("Unable to access {} path \"{}\": {}", name, value, e)),
    }
}

/// Validate every input, reporting each problem to the host before failing.
pub async fn validate_params(raw: RawParams, host: &dyn CiHost) -> Result<ValidatedParams> {
    let raw = raw.with_defaults();

    let token = parse_token(&raw.github_token);
    let incremental = parse_bool("incremental_files_only", &raw.incremental_files_only);
    let strict = parse_bool("strict", &raw.strict);
    let inline = raw.inline.parse::<InlineLevel>();
    let config = existing_path("config", &raw.config).await;
    let root = existing_path("root", &raw.root).await;

    match (token, incremental, strict, inline, config, root) {
        (
            Ok(github_token),
            Ok(incremental_files_only),
            Ok(strict),
            Ok(inline),
            Ok(config),
            Ok(root),
        ) => Ok(ValidatedParams {
            github_token,
            files: raw.files,
            incremental_files_only,
            config,
            root,
            inline,
            strict,
        }),
        (token, incremental, strict, inline, config, root) => {
            let problems: Vec<String> = [
                token.err(),
                incremental.err(),
                strict.err(),
                inline.err(),
                config.err(),
                root.err(),
            ]
            .into_iter()
            .flatten()
            .collect();

            for problem in &problems {
                host.error(problem);
            }
            Err(ActionError::Configuration(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryHost;
    use tempfile::tempdir;

    fn raw() -> RawParams {
        RawParams {
            github_token: "ghp_secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_bool() {
        for value in ["true", "TRUE", "t", "T", "1", " True "] {
            assert_eq!(normalize_bool(value), "true", "{value}");
        }
        for value in ["false", "False", "f", "F", "0"] {
            assert_eq!(normalize_bool(value), "false", "{value}");
        }
        assert_eq!(normalize_bool("yes"), "yes");
    }

    #[test]
    fn test_inline_level_is_case_insensitive() {
        assert_eq!("ERROR".parse::<InlineLevel>(), Ok(InlineLevel::Error));
        assert_eq!("Warning".parse::<InlineLevel>(), Ok(InlineLevel::Warning));
        assert_eq!("none".parse::<InlineLevel>(), Ok(InlineLevel::None));
        assert!("notice".parse::<InlineLevel>().is_err());
    }

    #[tokio::test]
    async fn test_defaults_validate() {
        let host = MemoryHost::default();
        let params = validate_params(raw(), &host).await.unwrap();

        assert!(params.incremental_files_only);
        assert!(params.strict);
        assert_eq!(params.inline, InlineLevel::Warning);
        assert_eq!(params.config, None);
        assert_eq!(params.root, None);
        assert!(host.errors().is_empty());
    }

    #[tokio::test]
    async fn test_empty_inputs_take_defaults() {
        let host = MemoryHost::default();
        let params = validate_params(
            RawParams {
                incremental_files_only: String::new(),
                inline: "  ".to_string(),
                strict: String::new(),
                ..raw()
            },
            &host,
        )
        .await
        .unwrap();

        assert!(params.incremental_files_only);
        assert!(params.strict);
        assert_eq!(params.inline, InlineLevel::Warning);
    }

    #[tokio::test]
    async fn test_bool_spellings_are_accepted() {
        let host = MemoryHost::default();
        let params = validate_params(
            RawParams {
                incremental_files_only: "F".to_string(),
                strict: "0".to_string(),
                inline: "NONE".to_string(),
                ..raw()
            },
            &host,
        )
        .await
        .unwrap();

        assert!(!params.incremental_files_only);
        assert!(!params.strict);
        assert_eq!(params.inline, InlineLevel::None);
    }

    #[tokio::test]
    async fn test_malformed_bool_is_rejected() {
        for value in ["yes", "no", "2", "truthy", "on"] {
            let host = MemoryHost::default();
            let result = validate_params(
                RawParams {
                    strict: value.to_string(),
                    ..raw()
                },
                &host,
            )
            .await;

            assert!(
                matches!(result, Err(ActionError::Configuration(ref p)) if p.len() == 1),
                "{value}"
            );
            assert_eq!(host.errors().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_every_problem_is_reported() {
        let host = MemoryHost::default();
        let result = validate_params(
            RawParams {
                github_token: String::new(),
                incremental_files_only: "maybe".to_string(),
                strict: "sometimes".to_string(),
                inline: "loud".to_string(),
                config: "/definitely/not/here/cspell.json".to_string(),
                root: "/definitely/not/here".to_string(),
                files: String::new(),
            },
            &host,
        )
        .await;

        match result {
            Err(ActionError::Configuration(problems)) => {
                assert_eq!(problems.len(), 6);
                assert_eq!(host.errors(), problems);
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_existing_paths_pass_through() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("spellchk.toml");
        std::fs::write(&config, "language = \"en_US\"\n").unwrap();

        let host = MemoryHost::default();
        let params = validate_params(
            RawParams {
                config: config.display().to_string(),
                root: dir.path().display().to_string(),
                ..raw()
            },
            &host,
        )
        .await
        .unwrap();

        assert_eq!(params.config, Some(config));
        assert_eq!(params.root, Some(dir.path().to_path_buf()));
    }
}
