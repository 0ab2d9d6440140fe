//! DTOs for decoding ZenQuotes responses.
//!
//! The provider answers with a JSON array of objects; only the first entry is
//! used. Missing text or author fields decode as empty strings, so only an
//! empty array or a malformed body counts as a decode failure.

use serde::Deserialize;

use crate::domain::Quote;

#[derive(Debug, Deserialize)]
pub(super) struct ZenQuoteDto {
    #[serde(rename = "q", default)]
    pub(super) quote: String,
    #[serde(rename = "a", default)]
    pub(super) author: String,
}

pub(super) fn first_quote(entries: Vec<ZenQuoteDto>) -> Result<Quote, String> {
    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| "quote payload was an empty array".to_owned())?;
    Ok(Quote::motivation(entry.quote, entry.author))
}
