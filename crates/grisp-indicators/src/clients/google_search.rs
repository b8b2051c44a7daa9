//! Google Custom Search JSON API adapter.

use grisp_core::format::{render_failure, render_not_found};
use grisp_core::AppConfig;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use super::{
    api_message, build_http_client, get_json, join_path, parse_base_url, render_listing,
    ListingEntry, MAX_LISTING_ENTRIES,
};
use crate::error::{AdapterError, FetchError};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";
const SOURCE_LABEL: &str = "Google Custom Search";

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default, rename = "displayLink")]
    display_link: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<SearchItem> for ListingEntry {
    fn from(item: SearchItem) -> Self {
        Self {
            title: item.title,
            description: item.snippet,
            source: item.display_link,
            link: item.link,
        }
    }
}

/// Top web search results for a query from a configured search engine.
pub struct WebSearchAdapter {
    client: Client,
    base_url: Url,
    api_key: String,
    engine_id: String,
}

impl WebSearchAdapter {
    pub const NAME: &'static str = "web_search";

    /// # Errors
    ///
    /// Returns [`AdapterError::MissingCredential`] when `GOOGLE_API_KEY` or
    /// `CX_ID` is unset, or [`AdapterError::Http`] if the HTTP client cannot
    /// be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdapterError> {
        let api_key = config
            .google_api_key
            .as_deref()
            .ok_or(AdapterError::MissingCredential("GOOGLE_API_KEY"))?;
        let engine_id = config
            .google_cx_id
            .as_deref()
            .ok_or(AdapterError::MissingCredential("CX_ID"))?;
        Self::new(api_key, engine_id, &config.user_agent)
    }

    /// # Errors
    ///
    /// Returns [`AdapterError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, engine_id: &str, user_agent: &str) -> Result<Self, AdapterError> {
        Self::with_base_url(api_key, engine_id, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates the adapter against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidBaseUrl`] or [`AdapterError::Http`].
    pub fn with_base_url(
        api_key: &str,
        engine_id: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AdapterError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        })
    }

    /// `Ok(None)` when the response has no `items` key, which is how the API
    /// reports zero results.
    async fn search(&self, query: &str) -> Result<Option<Vec<SearchItem>>, FetchError> {
        let url = join_path(&self.base_url, "customsearch/v1")?;
        let num = MAX_LISTING_ENTRIES.to_string();
        let request = self.client.get(url).query(&[
            ("key", self.api_key.as_str()),
            ("cx", self.engine_id.as_str()),
            ("q", query),
            ("num", num.as_str()),
        ]);

        let mut body = get_json(request, "Google search response").await?;
        if body.get("error").is_some() {
            let message = api_message(&body).unwrap_or_else(|| "unknown error".to_string());
            return Err(FetchError::Api(message));
        }

        match body.get_mut("items").map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(items) => serde_json::from_value(items)
                .map(Some)
                .map_err(|e| FetchError::Deserialize {
                    context: "Google search items".to_string(),
                    source: e,
                }),
        }
    }

    /// Renders the web search block for `query`.
    pub async fn fetch(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "Invalid query: web search text must not be empty.".to_string();
        }

        let items = match self.search(query).await {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    adapter = Self::NAME,
                    query,
                    error = %e,
                    "web search request failed"
                );
                return render_failure(SOURCE_LABEL, query, e);
            }
        };

        tracing::debug!(
            adapter = Self::NAME,
            query,
            count = items.len(),
            "fetched search results"
        );

        if items.is_empty() {
            return render_not_found(&format!("'{query}'"), "in web search results");
        }

        let entries: Vec<ListingEntry> = items.into_iter().map(ListingEntry::from).collect();
        render_listing(&format!("Top Web Search Results for '{query}':"), &entries)
    }
}
