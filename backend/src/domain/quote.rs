//! Motivational quotes fetched from a third-party API.

use serde::{Deserialize, Serialize};

/// Category label attached to every quote served by the tracker.
pub const MOTIVATION_CATEGORY: &str = "Motivation";

/// A quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text.
    pub quote: String,
    /// Attributed author.
    pub author: String,
    /// Category label.
    pub category: String,
}

impl Quote {
    /// Build a quote in the [`MOTIVATION_CATEGORY`].
    #[must_use]
    pub fn motivation(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
            category: MOTIVATION_CATEGORY.to_owned(),
        }
    }
}
