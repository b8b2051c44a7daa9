use std::fmt;

/// Sentiment bucket for a single scored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Report order: POSITIVE, NEUTRAL, NEGATIVE.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-bucket counts for one classifier invocation.
///
/// The counts always sum to the number of texts scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentTally {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// One post returned by the social feed.
#[derive(Debug, Clone)]
pub struct SocialPost {
    pub id: String,
    pub text: String,
    /// BCP-47 language tag as reported by the source, if any.
    pub lang: Option<String>,
}

impl SocialPost {
    #[must_use]
    pub fn is_english(&self) -> bool {
        self.lang
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case("en"))
    }
}
