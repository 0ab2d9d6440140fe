//! Driving port for motivational quotes.

use async_trait::async_trait;

use crate::domain::{Error, Quote};

/// Domain use-case port for `/motivation`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MotivationQuery: Send + Sync {
    /// Fetch one quote labelled with the motivation category.
    async fn motivation(&self) -> Result<Quote, Error>;
}
