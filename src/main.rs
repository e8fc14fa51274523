use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pr_version_bump::config::{
    self, non_blank, parse_flag, parse_label_list, parse_pr_number_input, Inputs, ReconcileConfig,
};
use pr_version_bump::logging;
use pr_version_bump::orchestration::{reconcile, ReconcileState};
use pr_version_bump::platform::{GitHubConfig, GitHubPlatform};
use pr_version_bump::report::{ActionsReporter, CommandFile};
use pr_version_bump::ui;

/// Every input can also be supplied as `INPUT_<NAME>`, the way the Actions
/// runner passes `with:` values.
#[derive(clap::Parser)]
#[command(
    name = "pr-version-bump",
    version,
    about = "Bump the package version of a pull request based on its labels"
)]
struct Args {
    #[arg(
        long,
        env = "INPUT_GITHUB-TOKEN",
        hide_env_values = true,
        help = "GitHub token (falls back to GITHUB_TOKEN)"
    )]
    github_token: Option<String>,

    #[arg(
        long,
        env = "INPUT_PR-NUMBER",
        help = "Pull request to process instead of the event's"
    )]
    pr_number: Option<String>,

    #[arg(
        long,
        env = "INPUT_LABELS-MAJOR",
        help = "Comma-separated labels for a major bump"
    )]
    labels_major: Option<String>,

    #[arg(
        long,
        env = "INPUT_LABELS-MINOR",
        help = "Comma-separated labels for a minor bump"
    )]
    labels_minor: Option<String>,

    #[arg(
        long,
        env = "INPUT_LABELS-PATCH",
        help = "Comma-separated labels for a patch bump"
    )]
    labels_patch: Option<String>,

    #[arg(
        long,
        env = "INPUT_SKIP-COMMIT",
        value_parser = parse_flag,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Compute the version without committing the manifest"
    )]
    skip_commit: Option<bool>,

    #[arg(
        long,
        env = "INPUT_CREATE-TAG",
        value_parser = parse_flag,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Create a version tag"
    )]
    create_tag: Option<bool>,

    #[arg(
        long,
        env = "INPUT_DRY-RUN",
        value_parser = parse_flag,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Preview without committing or tagging"
    )]
    dry_run: Option<bool>,

    #[arg(long, env = "INPUT_PATH", help = "Directory containing package.json")]
    path: Option<String>,

    #[arg(
        long,
        env = "INPUT_TAG-PREFIX",
        help = "Tag prefix, used when no template is given"
    )]
    tag_prefix: Option<String>,

    #[arg(
        long,
        env = "INPUT_TAG-TEMPLATE",
        help = "Tag template containing {{version}}"
    )]
    tag_template: Option<String>,

    #[arg(long, env = "INPUT_COMMIT-MESSAGE", help = "Commit message template")]
    commit_message: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn given(value: &Option<String>) -> Option<&str> {
    non_blank(value.as_deref())
}

impl Args {
    fn inputs(&self) -> pr_version_bump::Result<Inputs> {
        Ok(Inputs {
            pr_number: given(&self.pr_number).map(parse_pr_number_input).transpose()?,
            labels_major: given(&self.labels_major).map(parse_label_list),
            labels_minor: given(&self.labels_minor).map(parse_label_list),
            labels_patch: given(&self.labels_patch).map(parse_label_list),
            skip_commit: self.skip_commit,
            create_tag: self.create_tag,
            dry_run: self.dry_run,
            path: given(&self.path).map(str::to_string),
            tag_prefix: given(&self.tag_prefix).map(str::to_string),
            tag_template: given(&self.tag_template).map(str::to_string),
            commit_message: given(&self.commit_message).map(str::to_string),
        })
    }

    fn token(&self) -> String {
        given(&self.github_token)
            .map(str::to_string)
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::report_failure(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let file_config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;
    let reconcile_config = ReconcileConfig::resolve(&file_config, &args.inputs()?)?;

    let github = GitHubConfig::from_env(args.token())?;
    let platform = GitHubPlatform::new(github)?;
    let reporter = ActionsReporter::from_env();

    ui::display_status(&format!(
        "Checking {} in {}",
        reconcile_config.run_mode.manifest_path,
        platform.repository()
    ));

    let result = reconcile(&reconcile_config, &platform, &reporter).await?;
    ui::display_outcome(&result);

    if result.state() != ReconcileState::NoOp {
        if let Some(summary) = CommandFile::from_env("GITHUB_STEP_SUMMARY") {
            summary
                .append(&ui::summary_markdown(&result))
                .context("Failed to write step summary")?;
        }
    }

    Ok(())
}
