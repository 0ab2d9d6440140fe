//! Motivational quote endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Quote;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::TrackerState;

/// Quote payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub quote: String,
    pub author: String,
    #[schema(example = "Motivation")]
    pub category: String,
}

impl From<Quote> for QuoteResponse {
    fn from(value: Quote) -> Self {
        let Quote {
            quote,
            author,
            category,
        } = value;
        Self {
            quote,
            author,
            category,
        }
    }
}

/// Fetch a fresh motivational quote.
///
/// No session is required.
#[utoipa::path(
    get,
    path = "/motivation",
    responses(
        (status = 200, description = "Motivational quote", body = QuoteResponse),
        (status = 500, description = "Quote provider failed", body = ErrorSchema)
    ),
    tags = ["motivation"],
    operation_id = "motivation",
    security([])
)]
#[get("/motivation")]
pub async fn motivation(state: web::Data<TrackerState>) -> ApiResult<web::Json<QuoteResponse>> {
    let quote = state.motivation.motivation().await?;
    Ok(web::Json(QuoteResponse::from(quote)))
}
