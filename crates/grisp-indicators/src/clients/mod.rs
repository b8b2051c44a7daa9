//! REST-backed adapters and the HTTP plumbing they share.
//!
//! Each adapter issues exactly one GET per call and never retries. Request
//! URLs can carry API keys, so transport errors are stripped of their URL
//! before they are rendered into report text.

mod google_search;
mod news_api;
mod world_bank;

pub use google_search::WebSearchAdapter;
pub use news_api::NewsAdapter;
pub use world_bank::{EconomicAdapter, EconomicQuery};

use std::fmt::Write as _;

use grisp_core::format::or_placeholder;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::{AdapterError, FetchError};

/// Maximum entries shown by listing adapters (news, web search).
pub(crate) const MAX_LISTING_ENTRIES: usize = 5;

pub(crate) fn build_http_client(user_agent: &str) -> Result<Client, AdapterError> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Parses `base_url`, normalised to exactly one trailing slash so that
/// [`Url::join`] appends rather than replacing the last path segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, AdapterError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| AdapterError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join_path(base: &Url, path: &str) -> Result<Url, FetchError> {
    base.join(path)
        .map_err(|e| FetchError::UnexpectedShape(format!("cannot build request URL: {e}")))
}

/// Sends a GET and parses the body as JSON.
///
/// A non-2xx status becomes [`FetchError::UnexpectedStatus`] carrying the
/// provider's own error message when one can be found in the body.
pub(crate) async fn get_json(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<Value, FetchError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    let body = response.text().await.map_err(reqwest::Error::without_url)?;

    if !status.is_success() {
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| api_message(&v))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("no error detail")
                    .to_string()
            });
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Extracts a provider error message from the error envelopes we talk to.
///
/// - NewsAPI: `{"status": "error", "code": "...", "message": "..."}`
/// - Google: `{"error": {"code": 400, "message": "..."}}`
/// - World Bank: `[{"message": [{"id": "120", "key": "...", "value": "..."}]}]`
pub(crate) fn api_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(match body.get("code").and_then(Value::as_str) {
            Some(code) => format!("{code} - {message}"),
            None => message.to_string(),
        });
    }
    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }
    let first = body.get(0)?.get("message")?.get(0)?;
    first
        .get("value")
        .or_else(|| first.get("key"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// One row of a news or search listing, before placeholders are applied.
#[derive(Debug, Default, Clone)]
pub(crate) struct ListingEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub link: Option<String>,
}

/// Renders a numbered listing, at most [`MAX_LISTING_ENTRIES`] entries.
///
/// Missing fields are shown as placeholders; entries are never dropped.
pub(crate) fn render_listing(heading: &str, entries: &[ListingEntry]) -> String {
    let mut out = format!("{heading}\n");
    for (idx, entry) in entries.iter().take(MAX_LISTING_ENTRIES).enumerate() {
        let _ = write!(
            out,
            "\n{}. {} ({}): {}\n   Link: {}\n",
            idx + 1,
            or_placeholder(entry.title.as_deref(), "No Title"),
            or_placeholder(entry.source.as_deref(), "Unknown Source"),
            or_placeholder(entry.description.as_deref(), "No Description"),
            or_placeholder(entry.link.as_deref(), "No Link"),
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_base_url_normalises_trailing_slash() {
        let url = parse_base_url("https://api.worldbank.org/v2").unwrap();
        assert_eq!(url.as_str(), "https://api.worldbank.org/v2/");
        let url = parse_base_url("https://api.worldbank.org/v2///").unwrap();
        assert_eq!(url.as_str(), "https://api.worldbank.org/v2/");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("::nope::"),
            Err(AdapterError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn api_message_reads_known_envelopes() {
        let news = json!({"status": "error", "code": "apiKeyInvalid", "message": "bad key"});
        assert_eq!(api_message(&news).as_deref(), Some("apiKeyInvalid - bad key"));

        let google = json!({"error": {"code": 400, "message": "API key not valid."}});
        assert_eq!(api_message(&google).as_deref(), Some("API key not valid."));

        let world_bank = json!([{"message": [{"id": "120", "key": "Invalid value", "value": "The provided parameter value is not valid"}]}]);
        assert_eq!(
            api_message(&world_bank).as_deref(),
            Some("The provided parameter value is not valid")
        );

        assert_eq!(api_message(&json!({"items": []})), None);
    }

    #[test]
    fn render_listing_applies_placeholders() {
        let entries = vec![
            ListingEntry {
                title: Some("Headline".into()),
                description: Some("Body".into()),
                source: Some("Reuters".into()),
                link: Some("https://example.com/a".into()),
            },
            ListingEntry::default(),
        ];
        assert_eq!(
            render_listing("Results:", &entries),
            "Results:\n\
             \n1. Headline (Reuters): Body\n   Link: https://example.com/a\n\
             \n2. No Title (Unknown Source): No Description\n   Link: No Link"
        );
    }

    #[test]
    fn render_listing_caps_entries() {
        let entries = vec![ListingEntry::default(); MAX_LISTING_ENTRIES + 3];
        let rendered = render_listing("Results:", &entries);
        assert!(rendered.contains(&format!("\n{MAX_LISTING_ENTRIES}. ")));
        assert!(!rendered.contains(&format!("\n{}. ", MAX_LISTING_ENTRIES + 1)));
    }
}
