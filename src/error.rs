use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;
use std::path::PathBuf;

/// All errors that can occur while scraping ratings and rewriting roster files.
#[derive(thiserror::Error, Debug)]
pub enum RatingsError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// A card on the profile page holds fewer values than the field table needs.
    #[error("schema mismatch in {card}: expected at least {expected} values, found {found}")]
    SchemaMismatch {
        card: &'static str,
        expected: usize,
        found: usize,
    },

    /// Reading or writing a local file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A local file is not valid text in the configured encoding.
    #[error("{} is not valid {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The configured file encoding label is not recognised.
    #[error("unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    /// Writing the run summary as JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a CSV row failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file is not valid TOML for [`crate::Config`].
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The legacy roster file exists but has no lines.
    #[error("legacy roster file {} is empty", path.display())]
    EmptyLegacyFile { path: PathBuf },

    /// No legacy line ends with the player's identifier.
    #[error("no legacy record for player {identifier}")]
    MissingLegacyRecord { identifier: String },

    /// A requested team slug is not in the catalog.
    #[error("unknown team: {slug}")]
    UnknownTeam { slug: String },
}

impl<'a> From<SelectorErrorKind<'a>> for RatingsError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        RatingsError::Selector(err.to_string())
    }
}

impl RatingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RatingsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RatingsError>;
