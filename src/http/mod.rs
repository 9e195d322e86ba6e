//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, lifecycle)
//!     → request.rs (request ID)
//!     → payload.rs (UTF-8 decode, JSON parse, log)
//!     → response.rs (acknowledgement or 400)
//!     → Send to client
//! ```

pub mod payload;
pub mod request;
pub mod response;
pub mod server;

pub use payload::receive_payload;
pub use request::X_REQUEST_ID;
pub use response::{Acknowledgement, PayloadError, ACKNOWLEDGEMENT};
pub use server::{HttpServer, RunningServer};
