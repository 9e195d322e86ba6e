//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port)
//!     → listener.rs (resolve + bind)
//!     → tokio TcpListener handed to the HTTP server
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
