//! VADER compound sentiment scoring.
//!
//! VADER (Valence Aware Dictionary and sEntiment Reasoner) is tuned for short
//! social media and news text: it handles negation, degree boosters, capitals
//! and punctuation emphasis on top of its valence lexicon.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Score a text into a compound sentiment value in `[-1.0, 1.0]`.
///
/// Returns `0.0` for empty or whitespace-only text.
#[must_use]
pub fn compound_score(text: &str) -> f32 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let compound = scores.get("compound").copied().unwrap_or(0.0);

    #[allow(clippy::cast_possible_truncation)]
    let compound = compound.clamp(-1.0, 1.0) as f32;
    compound
}
