//! Builders wiring adapters into the HTTP state of each service.
//!
//! The generic builders take any port implementations so integration tests
//! can assemble the same state over in-memory adapters; the Diesel variants
//! are what the binaries use.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CompletionRepository, HabitRepository, IdentityResolver, PasswordHasher, QuoteSource,
    UserRepository,
};
use crate::domain::{HabitTrackingService, MotivationService, UserAccountsService};
use crate::inbound::http::state::{TrackerState, UserServiceState};
use crate::outbound::identity::UserServiceIdentityResolver;
use crate::outbound::persistence::{
    DbPool, DieselCompletionRepository, DieselHabitRepository, DieselUserRepository,
};
use crate::outbound::quotes::ZenQuotesSource;
use crate::outbound::security::Argon2PasswordHasher;

use super::config::TrackerUpstreams;

/// User service state over arbitrary repository and hasher adapters.
///
/// One [`UserAccountsService`] backs all three driving ports.
pub fn user_service_state<R, H>(
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
) -> UserServiceState
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let service = Arc::new(UserAccountsService::new(users, hasher, clock));
    UserServiceState {
        registration: service.clone(),
        login: service.clone(),
        current_user: service,
    }
}

/// Tracker state over arbitrary adapters.
pub fn tracker_state<H, C, Q>(
    identity: Arc<dyn IdentityResolver>,
    habits: Arc<H>,
    completions: Arc<C>,
    quotes: Arc<Q>,
    clock: Arc<dyn Clock>,
) -> TrackerState
where
    H: HabitRepository + 'static,
    C: CompletionRepository + 'static,
    Q: QuoteSource + 'static,
{
    let service = Arc::new(HabitTrackingService::new(habits, completions, clock));
    TrackerState {
        identity,
        habits: service.clone(),
        habits_query: service,
        motivation: Arc::new(MotivationService::new(quotes)),
    }
}

pub(super) fn build_user_service_state(pool: &DbPool) -> UserServiceState {
    user_service_state(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    )
}

pub(super) fn build_tracker_state(
    pool: &DbPool,
    upstreams: &TrackerUpstreams,
) -> std::io::Result<TrackerState> {
    let identity = UserServiceIdentityResolver::new(
        &upstreams.user_service_url,
        upstreams.identity_timeout,
    )
    .map_err(|err| std::io::Error::other(format!("identity client build failed: {err}")))?;
    let quotes = ZenQuotesSource::new(upstreams.quote_url.clone(), upstreams.quote_timeout)
        .map_err(|err| std::io::Error::other(format!("quote client build failed: {err}")))?;

    Ok(tracker_state(
        Arc::new(identity),
        Arc::new(DieselHabitRepository::new(pool.clone())),
        Arc::new(DieselCompletionRepository::new(pool.clone())),
        Arc::new(quotes),
        Arc::new(DefaultClock),
    ))
}
