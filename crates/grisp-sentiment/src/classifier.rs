//! Buckets scored texts into a [`SentimentTally`] and renders it.

use crate::scorer::compound_score;
use crate::types::{Sentiment, SentimentTally};

/// Compound scores at or above this are POSITIVE.
pub const POSITIVE_THRESHOLD: f32 = 0.05;
/// Compound scores at or below this are NEGATIVE.
pub const NEGATIVE_THRESHOLD: f32 = -0.05;

/// Maps a compound score to its bucket.
#[must_use]
pub fn bucket(score: f32) -> Sentiment {
    if score >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Scores every text and counts the buckets.
///
/// An empty input yields an all-zero tally.
pub fn classify<I, S>(texts: I) -> SentimentTally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tally = SentimentTally::default();
    for text in texts {
        tally.record(bucket(compound_score(text.as_ref())));
    }
    tally
}

/// Formats `count / total` as a percentage with one decimal place.
///
/// Returns `None` when `total` is zero; callers render an insufficient-data
/// message instead.
#[must_use]
pub fn format_share(count: usize, total: usize) -> Option<String> {
    if total == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let share = count as f64 / total as f64 * 100.0;
    Some(format!("{share:.1}%"))
}

/// Renders one `- LABEL: count (pct%)` line per bucket.
///
/// Returns `None` for an empty tally.
#[must_use]
pub fn render_breakdown(tally: &SentimentTally) -> Option<String> {
    let total = tally.total();
    let lines = Sentiment::ALL
        .iter()
        .map(|&sentiment| {
            let count = tally.count(sentiment);
            format_share(count, total).map(|pct| format!("- {sentiment}: {count} ({pct})"))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(lines.join("\n"))
}

/// Message used whenever a tally has nothing in it.
#[must_use]
pub fn render_insufficient(subject: &str) -> String {
    format!("Insufficient data: no English-language texts available to assess sentiment for '{subject}'.")
}
