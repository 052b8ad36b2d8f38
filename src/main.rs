use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relnotes::{
    build_changelog, parse_repo, render_markdown, render_yaml, Config, GitHubClient, PullRequest,
};

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Milestone changelog generator from pull request descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, default_value = ".relnotes/config.yml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a changelog for a milestone from GitHub
    Generate {
        /// Repository (owner/repo)
        #[arg(long)]
        repo: String,

        /// Milestone title (e.g. v1.39.0)
        #[arg(long)]
        milestone: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Output file (stdout if not provided)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Post the rendered Markdown changelog as a comment on this PR
        #[arg(long)]
        post_pr: Option<u64>,

        /// GitHub API token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Render a changelog from a materialized JSON pull request list
    Render {
        /// Path to a JSON file holding an array of pull requests
        #[arg(long)]
        input: PathBuf,

        /// Milestone title for the Markdown heading
        #[arg(long)]
        milestone: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Output file (stdout if not provided)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Output format for the rendered changelog
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Yaml,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("relnotes=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Generate {
            repo,
            milestone,
            format,
            output,
            post_pr,
            token,
        } => {
            run_generate(config, repo, milestone, format, output, post_pr, token).await?;
        }
        Commands::Render {
            input,
            milestone,
            format,
            output,
        } => {
            run_render(config, input, milestone, format, output)?;
        }
    }

    Ok(())
}

async fn run_generate(
    config: Config,
    repo: String,
    milestone: String,
    format: Format,
    output: Option<PathBuf>,
    post_pr: Option<u64>,
    token: String,
) -> Result<()> {
    let (owner, repo_name) = parse_repo(&repo)?;

    let github = GitHubClient::new(&token)?;
    let prs = github
        .list_merged_pull_requests(owner, repo_name, &milestone)
        .await?;

    if prs.is_empty() {
        info!(milestone, "No merged pull requests for milestone");
    }

    let grouped = build_changelog(&prs, &config);

    let text = match format {
        Format::Markdown => render_markdown(&grouped, &milestone),
        Format::Yaml => render_yaml(&grouped)?,
    };

    write_output(&text, output.as_deref())?;

    if let Some(pr_number) = post_pr {
        let markdown = render_markdown(&grouped, &milestone);
        let comment_id = github
            .post_comment(owner, repo_name, pr_number, &markdown)
            .await?;
        info!(comment_id, "Posted changelog comment");
        println!("Posted changelog comment (ID: {})", comment_id);
    }

    Ok(())
}

fn run_render(
    config: Config,
    input: PathBuf,
    milestone: String,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    let content = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read pull request list: {}", input.display()))?;

    let prs: Vec<PullRequest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse pull request list: {}", input.display()))?;

    let grouped = build_changelog(&prs, &config);

    let text = match format {
        Format::Markdown => render_markdown(&grouped, &milestone),
        Format::Yaml => render_yaml(&grouped)?,
    };

    write_output(&text, output.as_deref())
}

fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(output = %path.display(), "Changelog written");
        }
        None => print!("{}", text),
    }

    Ok(())
}
