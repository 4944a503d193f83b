//! Producer: serves a fresh random number on `GET /number`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use number_relay::generator;
use number_relay::lifecycle::{self, Shutdown};
use number_relay::HttpServer;

#[derive(Parser)]
#[command(name = "number-producer", version)]
#[command(about = "Serves a random number on GET /number", long_about = None)]
struct Cli {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind: IP address or resolvable host name (default 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Seed for a reproducible number sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Expose Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = lifecycle::prepare(cli.config.as_deref(), |config| {
        config
            .producer
            .listener
            .override_host_port(cli.host, cli.port);
        if cli.seed.is_some() {
            config.producer.numbers.seed = cli.seed;
        }
        if let Some(addr) = cli.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = addr;
        }
    })?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "number-producer starting");

    let listener = TcpListener::bind(&config.producer.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_listener(shutdown.clone());

    let generator = generator::from_config(&config.producer.numbers);
    let server = HttpServer::new(config.producer, generator);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
