//! Run configuration, optionally loaded from a TOML file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{RatingsError, Result};
use crate::model::{Team, TeamCatalog, CURRENT_TEAMS};
use crate::text::encoding_for_label;

pub const DEFAULT_BASE_URL: &str = "https://www.2kratings.com/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.89 Safari/537.36";

/// What to do with a scraped player that has no line in the legacy roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLegacyPolicy {
    /// Record the player as failed and write no row.
    #[default]
    Fail,
    /// Write the row with empty legacy columns.
    Placeholder,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile URLs are this prefix followed by the player identifier.
    pub base_url: String,
    pub user_agent: String,
    /// Encoding assumed for page bodies that do not declare one.
    pub charset: String,
    /// Encoding of the roster and legacy files, as a WHATWG label.
    pub file_charset: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
    /// Directory of `<slug>.txt` player identifier lists.
    pub roster_dir: PathBuf,
    /// Directory of existing `<display name>.csv` rosters.
    pub legacy_dir: PathBuf,
    /// Directory the rewritten `<display name>.csv` files go to.
    pub output_dir: PathBuf,
    pub on_missing_legacy: MissingLegacyPolicy,
    /// Slugs to process, in order. Each must resolve in the team catalog.
    pub teams: Vec<String>,
    /// `[[catalog]]` entries added to the built-in catalog, replacing any
    /// built-in team with the same slug.
    pub catalog: Vec<Team>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            charset: "utf-8".to_string(),
            file_charset: "utf-8".to_string(),
            timeout_secs: None,
            roster_dir: PathBuf::from("./database/player-names"),
            legacy_dir: PathBuf::from("./database/roster"),
            output_dir: PathBuf::from("./tempFolder"),
            on_missing_legacy: MissingLegacyPolicy::default(),
            teams: CURRENT_TEAMS.iter().map(|s| s.to_string()).collect(),
            catalog: Vec::new(),
        }
    }
}

impl Config {
    /// Load `path`, or fall back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml(&text, path)?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(RatingsError::io(path, e)),
        }
    }

    /// Parse TOML text. `path` is only used for error reporting.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| RatingsError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The built-in catalog with `catalog` entries applied on top.
    pub fn team_catalog(&self) -> TeamCatalog {
        let mut catalog = TeamCatalog::default();
        catalog.extend(self.catalog.iter().cloned());
        catalog
    }

    /// Encoding named by `file_charset`.
    pub fn file_encoding(&self) -> Result<&'static Encoding> {
        encoding_for_label(&self.file_charset)
    }

    pub fn roster_path(&self, team: &Team) -> PathBuf {
        self.roster_dir.join(format!("{}.txt", team.slug))
    }

    pub fn legacy_path(&self, team: &Team) -> PathBuf {
        self.legacy_dir.join(format!("{}.csv", team.display_name))
    }

    pub fn output_path(&self, team: &Team) -> PathBuf {
        self.output_dir.join(format!("{}.csv", team.display_name))
    }
}
