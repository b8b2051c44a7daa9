//! NewsAPI `everything` search adapter.

use grisp_core::format::{render_failure, render_not_found};
use grisp_core::AppConfig;
use grisp_sentiment::classifier::{render_breakdown, render_insufficient};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use super::{
    build_http_client, get_json, join_path, parse_base_url, render_listing, ListingEntry,
    MAX_LISTING_ENTRIES,
};
use crate::error::{AdapterError, FetchError};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";
const SOURCE_LABEL: &str = "NewsAPI";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<Article> for ListingEntry {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            description: article.description,
            source: article.source.and_then(|s| s.name),
            link: article.url,
        }
    }
}

/// Top English articles for a query, plus a headline sentiment split.
pub struct NewsAdapter {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl NewsAdapter {
    pub const NAME: &'static str = "news";

    /// # Errors
    ///
    /// Returns [`AdapterError::MissingCredential`] when `NEWSAPI_KEY` is unset,
    /// or [`AdapterError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdapterError> {
        let api_key = config
            .newsapi_key
            .as_deref()
            .ok_or(AdapterError::MissingCredential("NEWSAPI_KEY"))?;
        Self::new(api_key, &config.user_agent)
    }

    /// # Errors
    ///
    /// Returns [`AdapterError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, user_agent: &str) -> Result<Self, AdapterError> {
        Self::with_base_url(api_key, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates the adapter against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidBaseUrl`] or [`AdapterError::Http`].
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AdapterError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.to_string(),
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Article>, FetchError> {
        let url = join_path(&self.base_url, "v2/everything")?;
        let page_size = MAX_LISTING_ENTRIES.to_string();
        let request = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ]);

        let body: Value = get_json(request, "NewsAPI response").await?;
        let response: NewsResponse =
            serde_json::from_value(body).map_err(|e| FetchError::Deserialize {
                context: "NewsAPI response".to_string(),
                source: e,
            })?;

        if response.status.as_deref() != Some("ok") {
            let code = response.code.unwrap_or_else(|| "unknown".to_string());
            let message = response
                .message
                .unwrap_or_else(|| "no error message".to_string());
            return Err(FetchError::Api(format!("{code} - {message}")));
        }

        Ok(response.articles.unwrap_or_default())
    }

    /// Renders the news block for `query`.
    pub async fn fetch(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "Invalid query: news search text must not be empty.".to_string();
        }

        let articles = match self.search(query).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(
                    adapter = Self::NAME,
                    query,
                    error = %e,
                    "news request failed"
                );
                return render_failure(SOURCE_LABEL, query, e);
            }
        };

        tracing::debug!(
            adapter = Self::NAME,
            query,
            count = articles.len(),
            "fetched news articles"
        );

        if articles.is_empty() {
            return render_not_found(&format!("'{query}'"), "in NewsAPI");
        }

        let entries: Vec<ListingEntry> = articles
            .into_iter()
            .take(MAX_LISTING_ENTRIES)
            .map(ListingEntry::from)
            .collect();
        let listing = render_listing(&format!("Top News Articles for '{query}':"), &entries);

        format!("{listing}\n\n{}", headline_sentiment(query, &entries))
    }
}

/// Classifies the listed headlines; entries without a title are skipped.
fn headline_sentiment(query: &str, entries: &[ListingEntry]) -> String {
    let headlines = entries
        .iter()
        .filter_map(|e| e.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let tally = grisp_sentiment::classify(headlines);
    match render_breakdown(&tally) {
        Some(breakdown) => format!(
            "Headline Sentiment ({} headlines analysed):\n{breakdown}",
            tally.total()
        ),
        None => render_insufficient(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: Option<&str>) -> ListingEntry {
        ListingEntry {
            title: title.map(str::to_string),
            ..ListingEntry::default()
        }
    }

    #[test]
    fn headline_sentiment_counts_titled_entries_only() {
        let entries = [
            entry(Some("great news")),
            entry(Some("terrible disaster")),
            entry(Some("the sky is blue")),
            entry(None),
            entry(Some("   ")),
        ];
        assert_eq!(
            headline_sentiment("India", &entries),
            "Headline Sentiment (3 headlines analysed):\n\
             - POSITIVE: 1 (33.3%)\n\
             - NEUTRAL: 1 (33.3%)\n\
             - NEGATIVE: 1 (33.3%)"
        );
    }

    #[test]
    fn headline_sentiment_without_titles_is_insufficient() {
        let rendered = headline_sentiment("India", &[entry(None)]);
        assert!(rendered.starts_with("Insufficient data"), "{rendered}");
    }

    #[test]
    fn article_maps_nested_source_name() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "title": "T",
            "source": {"id": null, "name": "BBC News"},
            "url": "https://bbc.example/x"
        }))
        .unwrap();
        let entry = ListingEntry::from(article);
        assert_eq!(entry.source.as_deref(), Some("BBC News"));
        assert_eq!(entry.description, None);
    }
}
