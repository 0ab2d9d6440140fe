//! Server construction and middleware wiring for both services.

mod config;
mod shutdown;
mod startup;
mod state_builders;

pub use config::{
    DEFAULT_IDENTITY_TIMEOUT, DEFAULT_QUOTE_TIMEOUT, DEFAULT_TRACKER_BIND,
    DEFAULT_USER_SERVICE_BIND, DEFAULT_USER_SERVICE_URL, SettingsError, TrackerServerConfig,
    TrackerSettings, TrackerUpstreams, UserServerConfig, UserServiceSettings,
};
pub use startup::{StartupError, init_tracing, prepare_database};
pub use state_builders::{tracker_state, user_service_state};

use shutdown::{drain_on, shutdown_signal};
use state_builders::{build_tracker_state, build_user_service_state};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{TrackerApiDoc, UserServiceApiDoc};
use crate::inbound::http::habits::{create_habit, habit_stats, list_habits, track_habit};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::json_config;
use crate::inbound::http::motivation::motivation;
use crate::inbound::http::state::{TrackerState, UserServiceState};
use crate::inbound::http::users::{current_user, login, register};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Dependencies of the user service application.
pub struct UserAppDependencies {
    pub health_state: web::Data<HealthState>,
    pub state: web::Data<UserServiceState>,
    pub session: SessionMiddleware<CookieSessionStore>,
}

/// Dependencies of the tracker application.
#[derive(Clone)]
pub struct TrackerAppDependencies {
    pub health_state: web::Data<HealthState>,
    pub state: web::Data<TrackerState>,
}

/// Assemble the user service application: register, login, me and probes.
pub fn build_user_app(
    deps: UserAppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let UserAppDependencies {
        health_state,
        state,
        session,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .wrap(session)
        .wrap(Trace)
        .service(register)
        .service(login)
        .service(current_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", UserServiceApiDoc::openapi()),
    );

    app
}

/// Assemble the tracker application: habits, stats, motivation and probes.
pub fn build_tracker_app(
    deps: TrackerAppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let TrackerAppDependencies {
        health_state,
        state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(create_habit)
        .service(list_habits)
        .service(track_habit)
        .service(habit_stats)
        .service(motivation)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", TrackerApiDoc::openapi()),
    );

    app
}

/// Construct the user service HTTP server.
///
/// Must be called from within an actix system; the shutdown watcher is
/// spawned onto it.
///
/// # Parameters
/// - `health_state`: probe flags, marked ready once the listener is bound and
///   drained when a shutdown signal arrives.
/// - `config`: session settings, listener address and database pool.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_user_server(
    health_state: web::Data<HealthState>,
    config: UserServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let UserServerConfig {
        session,
        bind_addr,
        db_pool,
    } = config;
    let state = web::Data::new(build_user_service_state(&db_pool));
    info!(
        key_fingerprint = %session.fingerprint(),
        %bind_addr,
        "starting user service"
    );

    let server = HttpServer::new(move || {
        build_user_app(UserAppDependencies {
            health_state: server_health_state.clone(),
            state: state.clone(),
            session: session.middleware(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    Ok(server)
}

/// Construct the tracker HTTP server.
///
/// Must be called from within an actix system; the shutdown watcher is
/// spawned onto it.
///
/// # Errors
/// Propagates [`std::io::Error`] when an outbound client cannot be built or
/// binding the socket fails.
pub fn create_tracker_server(
    health_state: web::Data<HealthState>,
    config: TrackerServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let TrackerServerConfig {
        bind_addr,
        db_pool,
        upstreams,
    } = config;
    let state = web::Data::new(build_tracker_state(&db_pool, &upstreams)?);
    info!(
        %bind_addr,
        user_service = %upstreams.user_service_url,
        "starting tracker service"
    );

    let server = HttpServer::new(move || {
        build_tracker_app(TrackerAppDependencies {
            health_state: server_health_state.clone(),
            state: state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    Ok(server)
}
