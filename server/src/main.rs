use std::process::ExitCode;

use exercise_server::{logging, store, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let db = match store::open(&config.store_url) {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(store = %config.store_url, error = %err, "could not open exercise store");
            return ExitCode::FAILURE;
        }
    };
    if config.reset_store {
        if let Err(err) = db.clear().await {
            tracing::error!(error = %err, "could not reset exercise store");
            return ExitCode::FAILURE;
        }
        tracing::info!("exercise store reset");
    }

    let addr = config.socket_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "could not bind listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, "listening");

    match exercise_server::run_until(listener, db, shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler");
        signal.recv().await;
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
    tracing::info!("shutting down");
}
