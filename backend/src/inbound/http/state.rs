//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CurrentUserQuery, HabitCommand, HabitQuery, IdentityResolver, LoginService, MotivationQuery,
    RegistrationService,
};

/// Dependency bundle for the user service handlers.
#[derive(Clone)]
pub struct UserServiceState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub current_user: Arc<dyn CurrentUserQuery>,
}

/// Dependency bundle for the tracker service handlers.
#[derive(Clone)]
pub struct TrackerState {
    pub identity: Arc<dyn IdentityResolver>,
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub motivation: Arc<dyn MotivationQuery>,
}
