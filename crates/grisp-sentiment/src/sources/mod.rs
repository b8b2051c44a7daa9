//! Social text sources feeding the classifier.

mod twitter;

pub(crate) use twitter::{TwitterClient, MAX_POSTS};
