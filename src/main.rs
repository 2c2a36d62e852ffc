use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_tag_action::config::{self, ActionInputs};
use git_tag_action::domain::TagOutcome;
use git_tag_action::github::GitHubClient;
use git_tag_action::orchestrator;
use git_tag_action::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-tag-action",
    version,
    about = "Create or replace a tag on a GitHub repository through the REST API"
)]
struct Args {
    #[arg(long, env = "INPUT_TAG", help = "Name of the tag to create")]
    tag: String,

    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, help = "API token")]
    token: String,

    #[arg(long, env = "INPUT_REPOSITORY", help = "Target repository as owner/repo")]
    repository: Option<String>,

    #[arg(long, env = "INPUT_MESSAGE", help = "Annotation message; omit for a lightweight tag")]
    message: Option<String>,

    #[arg(long, env = "INPUT_SHA", help = "Commit the tag should point at")]
    sha: String,

    #[arg(
        long,
        env = "INPUT_DELETE",
        default_value = "false",
        action = clap::ArgAction::Set,
        value_parser = config::parse_boolean_input,
        help = "Delete an existing tag before creating the new one"
    )]
    delete: bool,

    #[arg(long, env = "INPUT_REPLACE_TAG", help = "Create the tag under this name instead")]
    replace_tag: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", hide = true)]
    context_repository: Option<String>,

    #[arg(long, env = "GITHUB_ACTOR", default_value = "github-actions[bot]", hide = true)]
    actor: String,

    #[arg(long, env = "GITHUB_API_URL", hide = true)]
    api_url: Option<String>,

    #[arg(long, env = "GITHUB_OUTPUT", hide = true)]
    output_file: Option<PathBuf>,

    #[arg(short, long, help = "Custom settings file path")]
    config: Option<String>,
}

impl Args {
    fn inputs(&self) -> ActionInputs {
        ActionInputs {
            tag: self.tag.clone(),
            token: self.token.clone(),
            repository: self.repository.clone(),
            context_repository: self.context_repository.clone(),
            message: self.message.clone(),
            sha: self.sha.clone(),
            delete: self.delete,
            replace_tag: self.replace_tag.clone(),
            actor: self.actor.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
            EnvFilter::new("git_tag_action=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<TagOutcome> {
    let inputs = args.inputs();
    inputs.check_token()?;

    let settings = inputs.apply_to(config::load_settings(args.config.as_deref())?);
    let repository = inputs.qualified_repository()?;
    let tagger = settings.tagger_for(&inputs.actor);

    let client = GitHubClient::new(&inputs.token, &settings.api)
        .context("Failed to create GitHub client")?;
    let outcome =
        orchestrator::run_tag_workflow(&client, &repository, &inputs.to_request(), &tagger)?;

    if let Some(path) = args.output_file.as_deref() {
        ui::write_output(path, "tag", &outcome.created_tag_name)?;
        ui::write_output(path, "sha", &outcome.sha)?;
    }

    Ok(outcome)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            ui::display_error(e.to_string().trim_end());
            return ExitCode::FAILURE;
        }
    };
    init_tracing();

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
