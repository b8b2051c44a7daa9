//! Sentiment classification for GRiSP risk reports.
//!
//! Scores short texts with a lexicon-based compound scorer, buckets them into
//! POSITIVE/NEUTRAL/NEGATIVE tallies, and wraps an X/Twitter recent-search
//! feed into the social-media sentiment adapter.

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod types;

mod sources;

pub use classifier::classify;
pub use error::SentimentError;
pub use pipeline::SocialSentimentAdapter;
pub use scorer::compound_score;
pub use types::{Sentiment, SentimentTally, SocialPost};
