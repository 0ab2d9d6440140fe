//! User service entry-point: registration, login and identity lookup.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;

use habit_tracker::inbound::http::health::HealthState;
use habit_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use habit_tracker::server::{
    UserServerConfig, UserServiceSettings, create_user_server, init_tracing, prepare_database,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        UserServiceSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;
    let db_pool = prepare_database(settings.pool_config()?)
        .await
        .wrap_err("database startup failed")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_user_server(
        health_state,
        UserServerConfig::new(session, bind_addr, db_pool),
    )?;
    server.await?;
    Ok(())
}
