//! `payload-receiver <port>`: the payload receiver on a port given on the command line.

use std::process::ExitCode;

use clap::{error::ErrorKind, CommandFactory, Parser};

use payload_receiver::config::loader::load_from_env;
use payload_receiver::lifecycle::startup;
use payload_receiver::observability::init_logging;
use payload_receiver::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "payload-receiver", version, about = "Accepts JSON payloads over HTTP POST", long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            if err.print().is_err() {
                eprintln!("{err}");
            }
            println!("{}", Cli::command().render_usage());
            return ExitCode::from(1);
        }
    };

    match run(cli.port).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("payload-receiver: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?.with_port(port);
    init_logging(&config.observability)?;

    tracing::info!("starting server...");
    startup::serve_until_signal(HttpServer::new(config)).await?;
    Ok(())
}
