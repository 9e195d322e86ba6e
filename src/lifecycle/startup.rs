//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Bind the listener and start the server
//! - Keep the process alive until a signal, then stop cleanly

use thiserror::Error;

use crate::config::validation::describe;
use crate::config::{validate_config, ReceiverConfig, ValidationError};
use crate::http::{HttpServer, RunningServer};
use crate::lifecycle::signals;
use crate::net::{self, ListenerError};

/// Fatal errors during startup or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", describe(.0))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validate `config`, bind its listener and start `server`.
pub async fn start(server: HttpServer) -> Result<RunningServer, StartupError> {
    validate_config(server.config()).map_err(StartupError::Config)?;
    let listener = net::bind(&server.config().listener).await?;
    Ok(server.start(listener)?)
}

/// Start a payload receiver for `config`.
pub async fn start_receiver(config: ReceiverConfig) -> Result<RunningServer, StartupError> {
    start(HttpServer::new(config)).await
}

/// Start `server` and serve until SIGINT/SIGTERM.
pub async fn serve_until_signal(server: HttpServer) -> Result<(), StartupError> {
    let running = start(server).await?;
    let _signals = signals::trigger_on_signal(running.shutdown_handle());
    running.wait().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
