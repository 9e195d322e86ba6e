//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler, relay, lifecycle
//!     → tracing events (with request span from TraceLayer)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stdout (pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request span
//! - One subscriber per process, installed by the binary

pub mod logging;

pub use logging::init_logging;
