//! The payload receiver on its built-in port.

use payload_receiver::config::loader::fixed_port_config;
use payload_receiver::lifecycle::startup;
use payload_receiver::observability::init_logging;
use payload_receiver::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = fixed_port_config()?;
    init_logging(&config.observability)?;

    startup::serve_until_signal(HttpServer::new(config)).await?;
    Ok(())
}
