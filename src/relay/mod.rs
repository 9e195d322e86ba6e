//! Relay subsystem: a path-routing front proxy for payload receivers.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (exact path, then longest prefix)
//!     → forward.rs (rewrite URI, forward, stream response back)
//!
//! Route Compilation (at startup):
//!     RelayRoute[] → parse upstreams → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Explicit 404 on no match rather than a silent default
//! - Upstream failures surface as 502, never retried

pub mod forward;
pub mod table;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;

use crate::config::ReceiverConfig;
use crate::http::HttpServer;

pub use forward::{forward_handler, RelayState};
pub use table::{Route, RouteTable};

/// Errors raised while building or running the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("No matching route found")]
    NoRoute,

    #[error("Upstream request failed")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    #[error("Invalid upstream address `{0}`")]
    InvalidUpstream(String),

    #[error("relay needs at least one route")]
    NoRoutesConfigured,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match self {
            RelayError::NoRoute => StatusCode::NOT_FOUND,
            RelayError::Upstream(_) | RelayError::InvalidUpstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::NoRoutesConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Routes every method and path to the forwarder.
pub fn routes(state: RelayState) -> Router {
    Router::new()
        .route("/", any(forward_handler))
        .route("/{*path}", any(forward_handler))
        .with_state(state)
}

/// Build a relay server from `config.relay.routes`.
pub fn server(config: ReceiverConfig) -> Result<HttpServer, RelayError> {
    let table = RouteTable::from_config(&config.relay.routes)?;
    tracing::info!(routes = table.len(), "Relay routes compiled");
    let state = RelayState::new(table);
    Ok(HttpServer::with_routes(config, routes(state)))
}
