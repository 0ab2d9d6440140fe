//! Reqwest-backed quote source for the ZenQuotes API.
//!
//! This adapter owns transport details only: the GET request, timeout and
//! HTTP error mapping, and JSON decoding into a domain [`Quote`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ZenQuoteDto, first_quote};
use crate::domain::Quote;
use crate::domain::ports::{QuoteSource, QuoteSourceError};
use crate::outbound::http_support::body_preview;

/// Default ZenQuotes endpoint returning one random quote.
pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://zenquotes.io/api/random";

/// Quote source performing HTTP GET requests against one endpoint.
pub struct ZenQuotesSource {
    client: Client,
    endpoint: Url,
}

impl ZenQuotesSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QuoteSource for ZenQuotesSource {
    async fn fetch_quote(&self) -> Result<Quote, QuoteSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(bytes = body.len(), "received quote payload");
        parse_quote(body.as_ref())
    }
}

fn parse_quote(body: &[u8]) -> Result<Quote, QuoteSourceError> {
    let decoded: Vec<ZenQuoteDto> = serde_json::from_slice(body).map_err(|error| {
        QuoteSourceError::decode(format!("invalid quote JSON payload: {error}"))
    })?;
    first_quote(decoded).map_err(QuoteSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> QuoteSourceError {
    if error.is_timeout() {
        QuoteSourceError::timeout(error.to_string())
    } else {
        QuoteSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> QuoteSourceError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            QuoteSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => QuoteSourceError::status(status.as_u16(), preview),
    }
}
