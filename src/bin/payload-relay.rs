//! `payload-relay <config.toml>`: forwards requests to payload receivers by path.

use std::path::PathBuf;

use clap::Parser;

use payload_receiver::config::load_config;
use payload_receiver::lifecycle::startup;
use payload_receiver::observability::init_logging;
use payload_receiver::relay;

#[derive(Parser, Debug)]
#[command(name = "payload-relay", version, about = "Path-routing front proxy for payload receivers", long_about = None)]
struct Cli {
    /// TOML file with `[listener]` and `[[relay.routes]]` sections.
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address(),
        "Configuration loaded"
    );

    let server = relay::server(config)?;
    startup::serve_until_signal(server).await?;
    Ok(())
}
