//! Caller identity for tracker endpoints.
//!
//! The tracker owns no sessions. [`CurrentUser`] lifts the `session` cookie
//! off the request and asks the configured [`IdentityResolver`] who it
//! belongs to. Requests without the cookie are rejected before any outbound
//! call is made.
//!
//! [`IdentityResolver`]: crate::domain::ports::IdentityResolver

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::{IdentityResolverError, SESSION_COOKIE_NAME, SessionCookie};
use crate::domain::{Error, NO_SESSION_MESSAGE, UserId};
use crate::inbound::http::state::TrackerState;

/// Message returned when the user service cannot confirm the caller.
pub const IDENTITY_UNAVAILABLE_MESSAGE: &str = "User service unavailable";

/// Authenticated caller of a tracker endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl CurrentUser {
    /// Identifier of the caller.
    pub fn id(&self) -> UserId {
        self.0
    }
}

fn map_identity_error(err: IdentityResolverError) -> Error {
    match err {
        IdentityResolverError::Unauthenticated { message } => Error::unauthorized(message),
        other => {
            warn!(error = %other, "identity resolution failed");
            Error::service_unavailable(IDENTITY_UNAVAILABLE_MESSAGE)
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let cookie = req
            .cookie(SESSION_COOKIE_NAME)
            .and_then(|cookie| SessionCookie::new(cookie.value()));
        let state = req.app_data::<web::Data<TrackerState>>().cloned();

        Box::pin(async move {
            let Some(cookie) = cookie else {
                return Err(Error::unauthorized(NO_SESSION_MESSAGE).into());
            };
            let Some(state) = state else {
                return Err(Error::internal("tracker state is not configured").into());
            };
            let user_id = state
                .identity
                .resolve(&cookie)
                .await
                .map_err(map_identity_error)?;
            Ok(CurrentUser(user_id))
        })
    }
}
