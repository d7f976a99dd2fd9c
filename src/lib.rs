//! Scrape per-player basketball ratings and merge them into team roster CSVs.
//!
//! For every team the job reads a list of player identifiers, fetches each
//! player's profile page, parses the rating cards, and writes one row per
//! player combining the fresh ratings with the metadata kept in the team's
//! existing roster file.

pub use client::{PageFetcher, RatingsClient};
pub use config::{Config, MissingLegacyPolicy};
pub use error::{RatingsError, Result};
pub use legacy::LegacyIndex;
pub use model::*;
pub use pipeline::{Pipeline, PlayerFailure, RunSummary, TeamFailure, TeamReport};
pub use roster::{load_roster, parse_roster};
pub use crate::scraper::{assist_rating, parse_profile_page};
pub use text::encoding_for_label;
pub use writer::{merge_record, TeamWriter};

mod client;
pub mod config;
mod error;
pub mod legacy;
mod model;
mod pipeline;
pub mod roster;
mod scraper;
mod text;
pub mod writer;
