//! Motivational quote outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `QuoteSource` port.

mod dto;
mod zenquotes_source;

pub use zenquotes_source::{DEFAULT_QUOTE_ENDPOINT, ZenQuotesSource};
