//! Port for third-party quote providers.

use async_trait::async_trait;

use crate::domain::Quote;

use super::define_port_error;

define_port_error! {
    /// Errors raised while fetching a quote.
    pub enum QuoteSourceError {
        /// The request could not be sent or the connection failed.
        Transport { message: String } => "quote transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } => "quote request timed out: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } => "quote provider returned {status}: {message}",
        /// The body was not a usable quote payload.
        Decode { message: String } => "quote payload could not be decoded: {message}",
    }
}

/// Driven port for fetching a single motivational quote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch one quote.
    async fn fetch_quote(&self) -> Result<Quote, QuoteSourceError>;
}
