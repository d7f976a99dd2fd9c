use std::time::Duration;

use tracing::instrument;

use crate::config::Config;
use crate::error::{RatingsError, Result};
use crate::scraper;

/// Source of player profile pages.
///
/// [`RatingsClient`] fetches them over HTTP. The pipeline only depends on this
/// trait, so tests can serve pages from memory.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Return the profile page body for `identifier`.
    async fn fetch_profile(&self, identifier: &str) -> Result<String>;
}

/// HTTP client for the ratings site.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> roster_ratings::Result<()> {
/// use roster_ratings::{parse_profile_page, Config, PageFetcher, RatingsClient};
///
/// let client = RatingsClient::new(&Config::default())?;
/// let body = client.fetch_profile("lebron-james").await?;
/// let ratings = parse_profile_page(&body)?;
/// println!("{:?}", ratings.values());
/// # Ok(())
/// # }
/// ```
pub struct RatingsClient {
    http: reqwest::Client,
    base_url: String,
    charset: String,
}

impl RatingsClient {
    /// Create a client with the user agent, timeout, base URL and charset from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(RatingsError::ClientBuild)?;
        Ok(Self::with_client(http, &config.base_url, &config.charset))
    }

    /// Create a client using the provided [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, charset: &str) -> Self {
        Self {
            http: client,
            base_url: base_url.to_string(),
            charset: charset.to_string(),
        }
    }

    /// The profile page URL: the base URL with the identifier appended.
    pub fn profile_url(&self, identifier: &str) -> String {
        format!("{}{identifier}", self.base_url)
    }
}

impl PageFetcher for RatingsClient {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, identifier: &str) -> Result<String> {
        let url = self.profile_url(identifier);
        scraper::get_page(&self.http, &url, &self.charset).await
    }
}
