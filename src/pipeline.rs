use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::client::PageFetcher;
use crate::config::Config;
use crate::error::{RatingsError, Result};
use crate::legacy::LegacyIndex;
use crate::model::{OutputRow, Team, TeamCatalog};
use crate::roster::load_roster;
use crate::scraper::parse_profile_page;
use crate::writer::{merge_record, TeamWriter};

/// A player that produced no output row.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerFailure {
    pub identifier: String,
    pub error: String,
}

/// Outcome of one team whose output file was written.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: Team,
    pub output: PathBuf,
    pub rows_written: usize,
    pub failures: Vec<PlayerFailure>,
}

/// A team that was skipped entirely.
#[derive(Debug, Clone, Serialize)]
pub struct TeamFailure {
    pub slug: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub teams: Vec<TeamReport>,
    pub failed_teams: Vec<TeamFailure>,
}

impl RunSummary {
    pub fn rows_written(&self) -> usize {
        self.teams.iter().map(|t| t.rows_written).sum()
    }

    pub fn player_failures(&self) -> usize {
        self.teams.iter().map(|t| t.failures.len()).sum()
    }

    /// True when every team was processed and every player produced a row.
    pub fn is_success(&self) -> bool {
        self.failed_teams.is_empty() && self.player_failures() == 0
    }

    /// Write the summary to `path` as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RatingsError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| RatingsError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} teams written, {} rows, {} player failures, {} team failures ({}s)",
            self.teams.len(),
            self.rows_written(),
            self.player_failures(),
            self.failed_teams.len(),
            (self.finished_at - self.started_at).num_seconds()
        )?;
        for team in &self.teams {
            for failure in &team.failures {
                writeln!(f, "  {} / {}: {}", team.team.slug, failure.identifier, failure.error)?;
            }
        }
        for failure in &self.failed_teams {
            writeln!(f, "  {}: {}", failure.slug, failure.error)?;
        }
        Ok(())
    }
}

/// Runs the scrape-and-merge job team by team, one player at a time.
pub struct Pipeline<F> {
    fetcher: F,
    config: Config,
    catalog: TeamCatalog,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        let catalog = config.team_catalog();
        Self {
            fetcher,
            config,
            catalog,
        }
    }

    /// Process the configured teams.
    pub async fn run(&self) -> RunSummary {
        self.run_teams(&self.config.teams).await
    }

    /// Process `slugs` in order. A team that cannot be processed is recorded
    /// and the run moves on to the next one.
    #[instrument(skip_all, fields(teams = slugs.len()))]
    pub async fn run_teams(&self, slugs: &[String]) -> RunSummary {
        let started_at = Utc::now();
        let mut teams = Vec::new();
        let mut failed_teams = Vec::new();

        for slug in slugs {
            let result = match self.catalog.get(slug) {
                Some(team) => self.run_team(team).await,
                None => Err(RatingsError::UnknownTeam { slug: slug.clone() }),
            };
            match result {
                Ok(report) => teams.push(report),
                Err(e) => {
                    warn!(team = %slug, error = %e, "team failed");
                    failed_teams.push(TeamFailure {
                        slug: slug.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        RunSummary {
            started_at,
            finished_at: Utc::now(),
            teams,
            failed_teams,
        }
    }

    /// Rewrite one team's output file.
    ///
    /// Fails before touching the output when the roster or legacy file cannot
    /// be read. Once the output is created, a player that cannot be fetched,
    /// parsed or matched is recorded in the report and skipped.
    #[instrument(skip_all, fields(team = %team.slug))]
    pub async fn run_team(&self, team: &Team) -> Result<TeamReport> {
        info!(display_name = %team.display_name, "processing team");

        let encoding = self.config.file_encoding()?;
        let names = load_roster(&self.config.roster_path(team), encoding)?;
        let index = LegacyIndex::load(&self.config.legacy_path(team), encoding)?;
        let mut writer = TeamWriter::create(&self.config.output_path(team))?;

        let mut failures = Vec::new();
        for identifier in &names {
            match self.process_player(&index, identifier).await {
                Ok(row) => writer.write_row(&row)?,
                Err(e) => {
                    warn!(identifier = %identifier, error = %e, "player failed");
                    failures.push(PlayerFailure {
                        identifier: identifier.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            rows = writer.rows_written(),
            failures = failures.len(),
            "team done"
        );

        Ok(TeamReport {
            team: team.clone(),
            output: writer.path().to_path_buf(),
            rows_written: writer.rows_written(),
            failures,
        })
    }

    async fn process_player(&self, index: &LegacyIndex, identifier: &str) -> Result<OutputRow> {
        let body = self.fetcher.fetch_profile(identifier).await?;
        let attributes = parse_profile_page(&body)?;
        merge_record(
            index,
            &attributes,
            identifier,
            self.config.on_missing_legacy,
        )
    }
}
