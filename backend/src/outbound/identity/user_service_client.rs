//! Reqwest-backed identity resolver that asks the user service who owns a
//! session.
//!
//! The caller's session cookie is forwarded verbatim to `GET /me`. The user
//! service stays the only component able to decrypt session cookies. The
//! active trace id travels along so both services log the same id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{CurrentUserDto, ErrorEnvelopeDto};
use crate::domain::ports::{
    IdentityResolver, IdentityResolverError, SESSION_COOKIE_NAME, SessionCookie,
};
use crate::domain::{NO_SESSION_MESSAGE, TRACE_ID_HEADER, TraceId, UserId};
use crate::outbound::http_support::body_preview;

/// Identity resolver backed by the user service's `/me` endpoint.
pub struct UserServiceIdentityResolver {
    client: Client,
    me_url: Url,
}

impl UserServiceIdentityResolver {
    /// Build a resolver for the user service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            me_url: me_url(base_url),
        })
    }

    /// Endpoint the resolver queries.
    pub fn me_url(&self) -> &Url {
        &self.me_url
    }
}

fn me_url(base_url: &Url) -> Url {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("me").unwrap_or(base)
}

#[async_trait]
impl IdentityResolver for UserServiceIdentityResolver {
    async fn resolve(&self, session: &SessionCookie) -> Result<UserId, IdentityResolverError> {
        let mut request = self
            .client
            .get(self.me_url.clone())
            .header(
                reqwest::header::COOKIE,
                format!("{SESSION_COOKIE_NAME}={}", session.as_str()),
            )
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        let response = request
            .send()
            .await
            .map_err(|error| IdentityResolverError::unavailable(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityResolverError::unavailable(error.to_string()))?;
        debug!(status = status.as_u16(), "user service answered identity lookup");
        interpret_response(status, body.as_ref())
    }
}

fn interpret_response(status: StatusCode, body: &[u8]) -> Result<UserId, IdentityResolverError> {
    match status {
        StatusCode::OK => {
            let dto: CurrentUserDto = serde_json::from_slice(body).map_err(|error| {
                IdentityResolverError::decode(format!("invalid /me payload: {error}"))
            })?;
            UserId::new(dto.id).map_err(|error| IdentityResolverError::decode(error.to_string()))
        }
        StatusCode::UNAUTHORIZED => {
            let message = serde_json::from_slice::<ErrorEnvelopeDto>(body)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| NO_SESSION_MESSAGE.to_owned());
            Err(IdentityResolverError::unauthenticated(message))
        }
        other => Err(IdentityResolverError::unavailable(format!(
            "status {}: {}",
            other.as_u16(),
            body_preview(body)
        ))),
    }
}
