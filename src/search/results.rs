//! Search results page scraping
//!
//! Builds the results-page URL for a query and pulls result links out of the
//! rendered DOM. Link filtering is plain Rust over the raw hrefs so it can be
//! tested without a browser.

use chromiumoxide::Page;
use url::Url;

use crate::core::error::{DwellError, Result};

/// Build the search results URL for a query term.
///
/// The term is encoded into the `q` parameter; everything else about the
/// engine URL is left as configured.
pub fn search_url(engine_url: &str, term: &str) -> Result<Url> {
    let mut url = Url::parse(engine_url)
        .map_err(|e| DwellError::config(format!("Bad engine URL '{}': {}", engine_url, e)))?;
    url.query_pairs_mut().append_pair("q", term);
    Ok(url)
}

/// Keep only well-formed absolute http(s) URLs, in page order, capped at `max`.
pub fn filter_links(raw: Vec<String>, max: usize) -> Vec<String> {
    raw.into_iter()
        .filter(|href| {
            Url::parse(href)
                .map(|u| matches!(u.scheme(), "http" | "https"))
                .unwrap_or(false)
        })
        .take(max)
        .collect()
}

/// Extract result links from a loaded search results page.
///
/// Reads the `href` of every anchor matched by `selector`, then filters and
/// caps the collection.
pub async fn extract_result_links(
    page: &Page,
    selector: &str,
    max: usize,
) -> Result<Vec<String>> {
    let js = format!(
        "Array.from(document.querySelectorAll('{}')).map(el => el.href)",
        selector
    );

    let raw: Vec<String> = page
        .evaluate(js)
        .await
        .map_err(|e| DwellError::search(format!("Failed to extract links: {}", e)))?
        .into_value()
        .unwrap_or_default();

    Ok(filter_links(raw, max))
}
