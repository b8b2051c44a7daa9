//! World Bank indicators API adapter.
//!
//! Input is a compound key `"<country_code>:<indicator_code>"`, for example
//! `"US:SP.POP.TOTL"`. The adapter asks for the single most recent data point
//! inside the configured trailing window.

use grisp_core::format::{render_failure, render_not_available, render_not_found, scale_magnitude};
use grisp_core::{AppConfig, TrailingWindow};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use super::{api_message, build_http_client, get_json, parse_base_url};
use crate::error::{AdapterError, FetchError};

const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2/";
const SOURCE_LABEL: &str = "World Bank";

/// A validated `"<country_code>:<indicator_code>"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomicQuery {
    pub country_code: String,
    pub indicator_code: String,
}

impl EconomicQuery {
    /// Splits `input` on `:` into exactly two non-empty, trimmed parts.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split(':');
        let country_code = parts.next()?.trim();
        let indicator_code = parts.next()?.trim();
        if parts.next().is_some() || country_code.is_empty() || indicator_code.is_empty() {
            return None;
        }
        Some(Self {
            country_code: country_code.to_string(),
            indicator_code: indicator_code.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(default)]
    indicator: Option<Label>,
    #[serde(default)]
    country: Option<Label>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Label {
    #[serde(default)]
    value: Option<String>,
}

impl Label {
    fn text(label: Option<&Label>) -> Option<&str> {
        label
            .and_then(|l| l.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Outcome of one World Bank lookup before rendering.
#[derive(Debug)]
enum Lookup {
    NoData,
    Found(Observation),
}

/// Fetches the latest value of one World Bank indicator for one country.
pub struct EconomicAdapter {
    client: Client,
    base_url: Url,
    window: TrailingWindow,
}

impl EconomicAdapter {
    pub const NAME: &'static str = "economic";

    /// Builds the adapter from process configuration. No credential needed.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdapterError> {
        Self::new(&config.user_agent, config.economic_window())
    }

    /// # Errors
    ///
    /// Returns [`AdapterError::Http`] if the HTTP client cannot be built.
    pub fn new(user_agent: &str, window: TrailingWindow) -> Result<Self, AdapterError> {
        Self::with_base_url(user_agent, window, DEFAULT_BASE_URL)
    }

    /// Creates the adapter against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidBaseUrl`] or [`AdapterError::Http`].
    pub fn with_base_url(
        user_agent: &str,
        window: TrailingWindow,
        base_url: &str,
    ) -> Result<Self, AdapterError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            base_url: parse_base_url(base_url)?,
            window,
        })
    }

    fn build_url(&self, query: &EconomicQuery) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::UnexpectedShape("base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend([
                "country",
                query.country_code.as_str(),
                "indicator",
                query.indicator_code.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("per_page", "1")
            .append_pair(
                "date",
                &format!("{}:{}", self.window.start_year(), self.window.reference_year),
            );
        Ok(url)
    }

    async fn lookup(&self, query: &EconomicQuery) -> Result<Lookup, FetchError> {
        let url = self.build_url(query)?;
        let body = get_json(self.client.get(url), "World Bank indicator response").await?;
        parse_response(body)
    }

    /// Renders the economic block for a `"<country_code>:<indicator_code>"` key.
    pub async fn fetch(&self, input: &str) -> String {
        let Some(query) = EconomicQuery::parse(input) else {
            return format!(
                "Invalid input format: expected '<country_code>:<indicator_code>' \
                 (e.g. 'US:SP.POP.TOTL'), got '{input}'."
            );
        };

        match self.lookup(&query).await {
            Ok(Lookup::NoData) => render_not_found(
                &format!("{} ({})", query.country_code, query.indicator_code),
                &format!(
                    "in the World Bank API between {} and {}",
                    self.window.start_year(),
                    self.window.reference_year
                ),
            ),
            Ok(Lookup::Found(observation)) => render_observation(&query, &observation),
            Err(e) => {
                tracing::warn!(
                    adapter = Self::NAME,
                    query = input,
                    error = %e,
                    "World Bank request failed"
                );
                render_failure(SOURCE_LABEL, input, e)
            }
        }
    }
}

/// Interprets the `[metadata, data]` envelope the World Bank returns.
fn parse_response(body: Value) -> Result<Lookup, FetchError> {
    if let Some(message) = api_message(&body) {
        return Err(FetchError::Api(message));
    }

    let Value::Array(mut parts) = body else {
        return Err(FetchError::UnexpectedShape(
            "expected a JSON array envelope".to_string(),
        ));
    };

    if parts.len() < 2 {
        return Err(FetchError::UnexpectedShape(
            "data array missing from response".to_string(),
        ));
    }

    let data = parts.swap_remove(1);
    let first = match data {
        Value::Null => return Ok(Lookup::NoData),
        Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
        Value::Array(_) => return Ok(Lookup::NoData),
        _ => {
            return Err(FetchError::UnexpectedShape(
                "data element is not an array".to_string(),
            ))
        }
    };

    let observation: Observation =
        serde_json::from_value(first).map_err(|e| FetchError::Deserialize {
            context: "World Bank observation".to_string(),
            source: e,
        })?;
    Ok(Lookup::Found(observation))
}

fn render_observation(query: &EconomicQuery, observation: &Observation) -> String {
    let country = Label::text(observation.country.as_ref()).unwrap_or(&query.country_code);
    let indicator = Label::text(observation.indicator.as_ref()).unwrap_or(&query.indicator_code);
    let year = observation
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("an unknown year");

    match observation.value {
        Some(value) => format!(
            "Economic Indicator for {country}:\n\
             - {indicator}: {} ({year})\n\
             - Source: {SOURCE_LABEL}",
            scale_magnitude(value)
        ),
        None => render_not_available(indicator, country, year),
    }
}
