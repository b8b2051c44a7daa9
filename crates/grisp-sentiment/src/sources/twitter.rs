//! X (Twitter) API v2 recent-search source.
//!
//! Calls `GET /2/tweets/search/recent` with a bearer token and returns at
//! most [`MAX_POSTS`] posts with their language tags. Language filtering is
//! left to the caller.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::SocialPost;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const RECENT_SEARCH_PATH: &str = "2/tweets/search/recent";

/// Upper bound on posts requested per query. Also the API's minimum page size.
pub(crate) const MAX_POSTS: usize = 10;

#[derive(Debug, Deserialize)]
struct RecentSearchResponse {
    #[serde(default)]
    data: Vec<ApiTweet>,
    #[serde(default)]
    errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
    #[serde(default)]
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiProblem {
    fn describe(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

pub(crate) struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
}

impl TwitterClient {
    /// Creates a client pointed at the production X API.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub(crate) fn new(bearer_token: &str, user_agent: &str) -> Result<Self, SentimentError> {
        Self::with_base_url(bearer_token, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::InvalidBaseUrl`] if `base_url` does not parse.
    pub(crate) fn with_base_url(
        bearer_token: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SentimentError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            base_url,
        })
    }

    fn build_url(&self, query: &str) -> Result<Url, SentimentError> {
        let mut url =
            self.base_url
                .join(RECENT_SEARCH_PATH)
                .map_err(|e| SentimentError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("max_results", &MAX_POSTS.to_string())
            .append_pair("tweet.fields", "lang");
        Ok(url)
    }

    /// Fetches up to [`MAX_POSTS`] recent posts matching `query`.
    ///
    /// A response with no `data` array and no `errors` is an empty result.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Api`] on a non-2xx status or an `errors` payload
    ///   without data.
    /// - [`SentimentError::Deserialize`] if the body is not the expected JSON.
    pub(crate) async fn recent_posts(&self, query: &str) -> Result<Vec<SocialPost>, SentimentError> {
        let url = self.build_url(query)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiProblem>(&body)
                .map(|p| p.describe())
                .unwrap_or_else(|_| "no error detail".to_string());
            return Err(SentimentError::Api(format!("HTTP {status}: {detail}")));
        }

        let parsed: RecentSearchResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: format!("recent search (query={query})"),
                source: e,
            })?;

        if parsed.data.is_empty() {
            if let Some(problem) = parsed.errors.first() {
                return Err(SentimentError::Api(problem.describe()));
            }
        }

        Ok(parsed
            .data
            .into_iter()
            .take(MAX_POSTS)
            .map(|tweet| SocialPost {
                id: tweet.id,
                text: tweet.text,
                lang: tweet.lang,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> TwitterClient {
        TwitterClient::with_base_url("test-bearer", "grisp-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_recent_search() {
        let client = test_client("https://api.twitter.com");
        let url = client.build_url("india").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/2/tweets/search/recent?query=india&max_results=10&tweet.fields=lang"
        );
    }

    #[test]
    fn build_url_encodes_query() {
        let client = test_client("https://api.twitter.com/");
        let url = client.build_url("sri lanka & protests").unwrap();
        assert!(
            url.as_str().contains("query=sri+lanka+%26+protests"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = TwitterClient::with_base_url("t", "ua", "not a url");
        assert!(matches!(result, Err(SentimentError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn deserialize_extra_fields_ignored() {
        let json = r#"{
            "data": [
                { "id": "1", "text": "hello", "lang": "en", "edit_history_tweet_ids": ["1"] }
            ],
            "meta": { "result_count": 1, "newest_id": "1" }
        }"#;
        let parsed: RecentSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].lang.as_deref(), Some("en"));
    }

    #[test]
    fn deserialize_no_results_response() {
        let json = r#"{ "meta": { "result_count": 0 } }"#;
        let parsed: RecentSearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data.is_empty());
        assert!(parsed.errors.is_empty());
    }
}
