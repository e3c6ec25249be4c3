use anyhow::{Context, Result};
use clap::Parser;
use spellchk_action::cli::{CiHost, ConsoleHost, GitHubActionsHost};
use spellchk_action::engine::command::{CommandEngine, DEFAULT_COMMAND, DEFAULT_CONFIG_FLAG};
use spellchk_action::github::rest::{GitHubRestClient, DEFAULT_API_URL};
use spellchk_action::{run_action, EventEnv, RawParams};
use std::path::PathBuf;

/// Every input can be given as a flag or through the environment variable the
/// Actions runner sets for it.
#[derive(Parser, Debug)]
#[command(name = "spellchk-action")]
#[command(version, about = "Spell check the files touched by a push or pull request", long_about = None)]
struct Cli {
    /// Token used to list the files of commits and pull requests
    #[arg(long, env = "INPUT_GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    github_token: String,

    /// Glob filter (incremental mode) or newline separated list of files
    #[arg(long, env = "INPUT_FILES", default_value = "")]
    files: String,

    /// Only check the files changed by the triggering event (true/false)
    #[arg(long, env = "INPUT_INCREMENTAL_FILES_ONLY", default_value = "true")]
    incremental_files_only: String,

    /// Spell checker configuration file
    #[arg(long, env = "INPUT_CONFIG", default_value = "")]
    config: String,

    /// Directory the files are relative to
    #[arg(long, env = "INPUT_ROOT", default_value = "")]
    root: String,

    /// Annotation level for issues (error, warning, none)
    #[arg(long, env = "INPUT_INLINE", default_value = "warning")]
    inline: String,

    /// Fail the run when spelling issues are found (true/false)
    #[arg(long, env = "INPUT_STRICT", default_value = "true")]
    strict: String,

    /// Spell checker command line; each file is appended as the last argument
    #[arg(long, env = "INPUT_ENGINE", default_value = DEFAULT_COMMAND)]
    engine: String,

    /// Flag the spell checker expects before the config path
    #[arg(long, env = "INPUT_ENGINE_CONFIG_FLAG", default_value = DEFAULT_CONFIG_FLAG)]
    engine_config_flag: String,

    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    event_name: String,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "")]
    repository: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File that receives the step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Emit workflow commands instead of console output
    #[arg(long, env = "GITHUB_ACTIONS")]
    github_actions: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn raw_params(&self) -> RawParams {
        RawParams {
            github_token: self.github_token.clone(),
            files: self.files.clone(),
            incremental_files_only: self.incremental_files_only.clone(),
            config: self.config.clone(),
            root: self.root.clone(),
            inline: self.inline.clone(),
            strict: self.strict.clone(),
        }
    }
}

async fn run(cli: &Cli, host: &dyn CiHost) -> Result<bool> {
    let env = EventEnv::new(&cli.event_name, cli.event_path.clone(), &cli.repository);
    let github = GitHubRestClient::new(&cli.api_url, &cli.github_token)
        .context("Failed to create the GitHub client")?;
    let engine =
        CommandEngine::from_command_line(&cli.engine).with_config_flag(&cli.engine_config_flag);

    let success = run_action(cli.raw_params(), &env, &github, &engine, host).await?;
    Ok(success)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let host: Box<dyn CiHost> = if cli.github_actions {
        Box::new(GitHubActionsHost::new(cli.output_file.clone()))
    } else {
        Box::new(ConsoleHost::new(!cli.no_color))
    };

    match run(&cli, host.as_ref()).await {
        Ok(success) => log::debug!("spell check finished, success={}", success),
        Err(err) => {
            host.set_failed(&format!("{:#}", err));
            std::process::exit(1);
        }
    }

    // Exit with appropriate code
    if host.has_failed() {
        std::process::exit(1);
    }

    Ok(())
}
