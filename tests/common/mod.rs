//! Shared utilities for integration tests.

use std::net::SocketAddr;

use payload_receiver::{HttpServer, ReceiverConfig, RunningServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a payload receiver with default settings on an ephemeral port.
#[allow(dead_code)]
pub async fn start_receiver() -> RunningServer {
    start_server(HttpServer::new(ReceiverConfig::default())).await
}

/// Start any server on an ephemeral loopback port.
pub async fn start_server(server: HttpServer) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    server.start(listener).unwrap()
}

/// A client that never goes through a system proxy and never pools.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send raw bytes and read the full response (the request must ask for `Connection: close`).
#[allow(dead_code)]
pub async fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
