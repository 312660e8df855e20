use spider_client::shapes::request::{ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tracing::info;

use crate::error::ScrapeError;

/// Fetch one listing page through the rendering service and return its
/// content region as markdown. These pages need script execution, which
/// happens service-side before extraction.
///
/// The client lives inside this call and is dropped on every exit path.
/// No retries; a failed fetch is a hard failure for this page.
pub async fn fetch_rendered(url: &str) -> Result<String, ScrapeError> {
    let fetch_err = |reason: String| ScrapeError::Fetch {
        url: url.to_string(),
        reason,
    };

    let api_key = std::env::var("SPIDER_API_KEY")
        .map_err(|_| fetch_err("SPIDER_API_KEY environment variable must be set".into()))?;
    let spider = Spider::new(Some(api_key)).map_err(|e| fetch_err(e.to_string()))?;

    let params = RequestParams {
        return_format: Some(ReturnFormatHandling::Single(ReturnFormat::Markdown)),
        ..Default::default()
    };

    info!("Fetching rendered page: {}", url);
    let response = spider
        .scrape_url(url, Some(params), "application/json")
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    let parsed: serde_json::Value = match response.as_str() {
        Some(s) => serde_json::from_str(s).unwrap_or(response.clone()),
        None => response,
    };

    let first = parsed.as_array().and_then(|arr| arr.first());

    if let Some(status) = first
        .and_then(|obj| obj.get("status"))
        .and_then(|s| s.as_i64())
    {
        if !(200..300).contains(&status) {
            return Err(fetch_err(format!("HTTP status {}", status)));
        }
    }

    first
        .and_then(|obj| obj.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_owned)
        .filter(|md| !md.trim().is_empty())
        .ok_or_else(|| ScrapeError::MissingContent {
            url: url.to_string(),
        })
}
