//! Motivation quote service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{MotivationQuery, QuoteSource, QuoteSourceError};
use crate::domain::{Error, Quote};

/// Message returned when the provider could not be reached.
pub const QUOTE_FETCH_FAILED: &str = "Failed to fetch motivation quote";
/// Message returned when the provider's payload was unusable.
pub const QUOTE_DECODE_FAILED: &str = "Failed to decode motivation quote";

/// Service implementing [`MotivationQuery`] on top of a [`QuoteSource`].
#[derive(Clone)]
pub struct MotivationService<Q> {
    source: Arc<Q>,
}

impl<Q> MotivationService<Q> {
    /// Create a new service backed by `source`.
    pub fn new(source: Arc<Q>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: QuoteSourceError) -> Error {
    warn!(error = %error, "motivation quote unavailable");
    match error {
        QuoteSourceError::Decode { .. } => Error::upstream(QUOTE_DECODE_FAILED),
        QuoteSourceError::Transport { .. }
        | QuoteSourceError::Timeout { .. }
        | QuoteSourceError::Status { .. } => Error::upstream(QUOTE_FETCH_FAILED),
    }
}

#[async_trait]
impl<Q> MotivationQuery for MotivationService<Q>
where
    Q: QuoteSource,
{
    async fn motivation(&self) -> Result<Quote, Error> {
        self.source.fetch_quote().await.map_err(map_source_error)
    }
}
