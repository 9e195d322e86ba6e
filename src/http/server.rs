//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum Router for the payload handler (or a caller-supplied one)
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Own the listening socket from `start` until `stop`
//!
//! # Design Decisions
//! - `start` consumes the listener; the socket lives inside the serving task
//! - `RunningServer::stop` triggers graceful shutdown and waits for the task
//! - Dropping a `RunningServer` also triggers shutdown, so the port is always released

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ReceiverConfig;
use crate::http::payload::receive_payload;
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::shutdown::{wait_for, Shutdown};

/// Routes every POST, on any path, to the payload handler.
pub fn payload_routes() -> Router {
    Router::new()
        .route("/", post(receive_payload))
        .route("/{*path}", post(receive_payload))
}

/// HTTP server bound to one router and one configuration.
pub struct HttpServer {
    router: Router,
    config: ReceiverConfig,
}

impl HttpServer {
    /// Create a payload-receiving server.
    pub fn new(config: ReceiverConfig) -> Self {
        Self::with_routes(config, payload_routes())
    }

    /// Create a server around arbitrary routes, with the same middleware.
    pub fn with_routes(config: ReceiverConfig, routes: Router) -> Self {
        let router = Self::build_router(&config, routes);
        Self { router, config }
    }

    /// Wrap `routes` with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ReceiverConfig, routes: Router) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = request_id(request).unwrap_or("unknown"),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        routes.layer(DefaultBodyLimit::disable()).layer(middleware)
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Serving on port {}", addr.port());

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }

    /// Start serving in a background task and return its handle.
    pub fn start(self, listener: TcpListener) -> Result<RunningServer, std::io::Error> {
        let local_addr = listener.local_addr()?;
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let task = tokio::spawn(self.run(listener, rx));

        Ok(RunningServer {
            local_addr,
            shutdown,
            task: Some(task),
        })
    }
}

/// Handle to a server started with [`HttpServer::start`].
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl RunningServer {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// A coordinator whose trigger stops this server.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Stop accepting, finish in-flight requests, and release the socket.
    pub async fn stop(mut self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        self.join().await
    }

    /// Wait for the server to stop on its own (e.g. after `shutdown_handle().trigger()`).
    pub async fn wait(mut self) -> Result<(), std::io::Error> {
        self.join().await
    }

    async fn join(&mut self) -> Result<(), std::io::Error> {
        match self.task.take() {
            Some(task) => task.await.map_err(std::io::Error::other)?,
            None => Ok(()),
        }
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.shutdown.trigger();
        }
    }
}
