//! Social-media sentiment adapter.

use grisp_core::format::render_failure;
use grisp_core::AppConfig;

use crate::classifier::{classify, render_breakdown, render_insufficient};
use crate::error::SentimentError;
use crate::sources::{TwitterClient, MAX_POSTS};

const SOURCE_LABEL: &str = "X recent search";

/// Fetches recent posts for a query, keeps English ones, and reports the
/// sentiment split.
///
/// Construction requires a bearer token; without one the adapter cannot work
/// at all, so the failure surfaces at startup rather than per call.
pub struct SocialSentimentAdapter {
    client: TwitterClient,
}

impl SocialSentimentAdapter {
    pub const NAME: &'static str = "social_sentiment";

    /// Builds the adapter from process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingCredential`] when
    /// `TWITTER_BEARER_TOKEN` is unset, or [`SentimentError::Http`] if the
    /// HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let token = config
            .twitter_bearer_token
            .as_deref()
            .ok_or(SentimentError::MissingCredential("TWITTER_BEARER_TOKEN"))?;
        Self::new(token, &config.user_agent)
    }

    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(bearer_token: &str, user_agent: &str) -> Result<Self, SentimentError> {
        Ok(Self {
            client: TwitterClient::new(bearer_token, user_agent)?,
        })
    }

    /// Points the adapter at a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidBaseUrl`] or [`SentimentError::Http`].
    pub fn with_base_url(
        bearer_token: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client: TwitterClient::with_base_url(bearer_token, user_agent, base_url)?,
        })
    }

    /// Runs one query end to end and renders the result as text.
    ///
    /// Never fails: transport and API errors come back as a failure line.
    pub async fn fetch(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "Invalid query: social sentiment search text must not be empty.".to_string();
        }

        let posts = match self.client.recent_posts(query).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(
                    adapter = Self::NAME,
                    query,
                    error = %e,
                    "social feed request failed"
                );
                return render_failure(SOURCE_LABEL, query, e);
            }
        };

        let fetched = posts.len();
        let english: Vec<String> = posts
            .into_iter()
            .filter(crate::types::SocialPost::is_english)
            .take(MAX_POSTS)
            .map(|post| post.text)
            .collect();

        tracing::debug!(
            adapter = Self::NAME,
            query,
            fetched,
            english = english.len(),
            "collected social posts"
        );

        let tally = classify(&english);
        match render_breakdown(&tally) {
            Some(breakdown) => format!(
                "Social Media Sentiment for '{query}' ({} English posts analysed):\n{breakdown}",
                tally.total()
            ),
            None => render_insufficient(query),
        }
    }
}
