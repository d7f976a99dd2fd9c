//! Roster ratings CLI
//!
//! Scrapes the ratings of every rostered player and rewrites each team's CSV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roster_ratings::{Config, Pipeline, RatingsClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster-ratings")]
#[command(about = "Scrape player ratings and merge them into team roster CSVs", long_about = None)]
struct Cli {
    /// Config file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "ratings.toml")]
    config: PathBuf,

    /// Only process this team slug (repeatable)
    #[arg(short, long = "team")]
    teams: Vec<String>,

    /// Also write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(&cli.config).context("failed to load configuration")?;
    if !cli.teams.is_empty() {
        config.teams = cli.teams;
    }
    info!(
        teams = config.teams.len(),
        output = %config.output_dir.display(),
        "starting run"
    );

    let client = RatingsClient::new(&config).context("failed to create http client")?;
    let pipeline = Pipeline::new(client, config);
    let summary = pipeline.run().await;

    print!("{summary}");
    if let Some(path) = &cli.summary_json {
        summary
            .write_json(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        info!(path = %path.display(), "wrote summary");
    }
    if !summary.is_success() {
        anyhow::bail!(
            "{} player failures, {} team failures",
            summary.player_failures(),
            summary.failed_teams.len()
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
