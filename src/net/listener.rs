//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve and bind the configured host and port
//! - Log the bound address
//!
//! Port 0 never reaches here from startup (config validation rejects it);
//! callers binding directly may still pass it for an OS-assigned port.

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    bind_address(&config.bind_address()).await
}

/// Bind an explicit `host:port` string.
pub async fn bind_address(address: &str) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.to_string(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }
    Ok(listener)
}
