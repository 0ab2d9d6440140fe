//! Graceful shutdown: drain the probes, then stop the server.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use crate::inbound::http::health::HealthState;

/// Resolve on Ctrl+C, or SIGTERM on Unix.
///
/// A signal that cannot be installed is logged and never fires, leaving the
/// other one in charge.
pub(super) async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C"),
            Err(err) => {
                warn!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received SIGTERM");
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Wait for `shutdown`, mark the service as draining, then stop the server
/// once in-flight requests complete.
pub(super) async fn drain_on<F>(shutdown: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    health_state.mark_draining();
    info!("draining connections before shutdown");
    handle.stop(true).await;
}
