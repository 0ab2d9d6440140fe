//! Tracker service entry-point: habits, statistics and motivation quotes.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;

use habit_tracker::inbound::http::health::HealthState;
use habit_tracker::server::{
    TrackerServerConfig, TrackerSettings, TrackerUpstreams, create_tracker_server, init_tracing,
    prepare_database,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        TrackerSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let upstreams = TrackerUpstreams::try_from(&settings)?;
    let db_pool = prepare_database(settings.pool_config()?)
        .await
        .wrap_err("database startup failed")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_tracker_server(
        health_state,
        TrackerServerConfig::new(bind_addr, db_pool, upstreams),
    )?;
    server.await?;
    Ok(())
}
