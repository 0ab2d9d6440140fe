//! Scriptable stand-ins for the password hasher, the user service lookup
//! and the quote provider.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{
    IdentityResolver, IdentityResolverError, PasswordHash, PasswordHashError, PasswordHasher,
    QuoteSource, QuoteSourceError, SessionCookie,
};
use crate::domain::{NO_SESSION_MESSAGE, Quote, UserId};

use super::lock;

const PLAINTEXT_PREFIX: &str = "plain$";

/// Reversible "hash" so tests avoid Argon2's cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

impl PasswordHasher for PlaintextPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PLAINTEXT_PREFIX}{password}")))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let stored = hash
            .as_str()
            .strip_prefix(PLAINTEXT_PREFIX)
            .ok_or_else(|| PasswordHashError::malformed("missing plaintext prefix"))?;
        Ok(stored == password)
    }
}

/// Resolves session cookies from a fixed table.
///
/// Unknown cookies are rejected the way the user service rejects a request
/// without a session.
#[derive(Default)]
pub struct StaticIdentityResolver {
    sessions: Mutex<HashMap<String, UserId>>,
    unavailable: AtomicBool,
}

impl StaticIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `cookie` as a session for `user`.
    pub fn grant(&self, cookie: impl Into<String>, user: UserId) {
        lock(&self.sessions, "sessions").insert(cookie.into(), user);
    }

    pub fn revoke(&self, cookie: &str) {
        lock(&self.sessions, "sessions").remove(cookie);
    }

    /// Simulate the user service being unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, session: &SessionCookie) -> Result<UserId, IdentityResolverError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityResolverError::unavailable("connection refused"));
        }
        lock(&self.sessions, "sessions")
            .get(session.as_str())
            .copied()
            .ok_or_else(|| IdentityResolverError::unauthenticated(NO_SESSION_MESSAGE))
    }
}

/// Quote source returning whatever outcome the test scripted last.
pub struct StubQuoteSource {
    outcome: Mutex<Result<Quote, QuoteSourceError>>,
}

impl StubQuoteSource {
    pub fn succeeding(quote: Quote) -> Self {
        Self {
            outcome: Mutex::new(Ok(quote)),
        }
    }

    pub fn failing(error: QuoteSourceError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
        }
    }

    pub fn set_outcome(&self, outcome: Result<Quote, QuoteSourceError>) {
        *lock(&self.outcome, "quote") = outcome;
    }
}

impl Default for StubQuoteSource {
    fn default() -> Self {
        Self::succeeding(Quote::motivation(
            "Well begun is half done.",
            "Aristotle",
        ))
    }
}

#[async_trait]
impl QuoteSource for StubQuoteSource {
    async fn fetch_quote(&self) -> Result<Quote, QuoteSourceError> {
        lock(&self.outcome, "quote").clone()
    }
}
