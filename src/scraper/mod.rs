pub(crate) mod profile;

use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{RatingsError, Result};

pub use profile::{assist_rating, parse_profile_page};

/// Fetch a URL and return the body decoded with `charset`.
///
/// `charset` is the fallback used when the response does not declare one.
pub(crate) async fn get_page(client: &reqwest::Client, url: &str, charset: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| RatingsError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RatingsError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response
        .text_with_charset(charset)
        .await
        .map_err(|e| RatingsError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

    debug!(url, bytes = body.len(), "fetched page");
    Ok(body)
}

/// First element matching `selector` inside `element`.
pub(crate) fn select_first<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or(RatingsError::ElementNotFound { context })
}

/// All text inside `element`, trimmed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .trim()
        .replace(['\n', '\t'], "")
}
