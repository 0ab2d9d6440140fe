//! DTOs exchanged with the user service.

use serde::Deserialize;

/// Subset of the `/me` payload the tracker needs.
#[derive(Debug, Deserialize)]
pub(super) struct CurrentUserDto {
    pub(super) id: i64,
}

/// Error envelope returned by the user service.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: String,
}
