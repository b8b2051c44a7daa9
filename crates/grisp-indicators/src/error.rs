use std::path::PathBuf;

use grisp_sentiment::SentimentError;
use thiserror::Error;

/// Failures while loading a CSV dataset. Always fatal for the adapter.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {dataset} dataset at {}: {source}", path.display())]
    Io {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {dataset} dataset: {source}")]
    Csv {
        dataset: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{dataset} dataset is missing required column \"{column}\"")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },

    #[error("{dataset} dataset row {row}: invalid {column} value \"{value}\"")]
    InvalidValue {
        dataset: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Construction-time failures. An adapter that fails here is unusable.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Sentiment(#[from] SentimentError),
}

/// Per-call failures. Adapters render these as text; they never escape `fetch`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
