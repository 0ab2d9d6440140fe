//! Port for resolving the calling user from their session credential.
//!
//! The tracker service does not own sessions. It forwards the caller's
//! session cookie to whoever does and receives the authenticated user id.

use std::fmt;

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving a caller's identity.
    pub enum IdentityResolverError {
        /// The session is missing, expired, or unknown.
        Unauthenticated { message: String } => "{message}",
        /// The identity provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The identity provider answered with an unexpected payload.
        Decode { message: String } => "identity response could not be decoded: {message}",
    }
}

/// Name of the cookie that carries the user service session.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Opaque session cookie value presented by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie(String);

impl SessionCookie {
    /// Wrap a raw cookie value. Returns `None` for blank values.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Borrow the raw cookie value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCookie(..)")
    }
}

/// Driven port for per-request identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the user that owns `session`.
    async fn resolve(&self, session: &SessionCookie) -> Result<UserId, IdentityResolverError>;
}
