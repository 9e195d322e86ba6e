//! JSON payload receiver.
//!
//! Accepts POST requests on any path, checks that the body is a JSON
//! document, logs it, and answers with a fixed acknowledgement.
//!
//! ```text
//!     Client POST ──▶ net::listener ──▶ http::server ──▶ http::payload ──▶ 200 / 400
//!                                         (request id,      (utf-8, json,
//!                                          trace, limits)    logging)
//!
//!     payload-relay:  Client ──▶ relay::table ──▶ relay::forward ──▶ payload receiver
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;

pub use config::ReceiverConfig;
pub use http::{HttpServer, RunningServer};
pub use lifecycle::Shutdown;
