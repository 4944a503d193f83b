//! Consumer: polls the producer forever and prints each number.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use number_relay::consumer::{NumberClient, Poller, StdoutReporter};
use number_relay::lifecycle::{self, Shutdown};

#[derive(Parser)]
#[command(name = "number-consumer", version)]
#[command(about = "Polls a number producer and prints what it returns", long_about = None)]
struct Cli {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Producer base URL (default http://localhost:5000)
    #[arg(short, long, env = "PRODUCER_URL")]
    url: Option<String>,

    /// Seconds to wait between polls
    #[arg(short, long)]
    interval_secs: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = lifecycle::prepare(cli.config.as_deref(), |config| {
        if let Some(url) = cli.url {
            config.consumer.producer_url = url;
        }
        if let Some(secs) = cli.interval_secs {
            config.consumer.interval_secs = secs;
        }
        if let Some(secs) = cli.timeout_secs {
            config.consumer.timeout_secs = secs;
        }
    })?;

    let client = NumberClient::new(&config.consumer)?;
    tracing::info!(
        endpoint = %client.endpoint(),
        interval_secs = config.consumer.interval_secs,
        timeout_secs = config.consumer.timeout_secs,
        "number-consumer starting"
    );

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_listener(shutdown.clone());

    let poller = Poller::new(
        client,
        Duration::from_secs(config.consumer.interval_secs),
        StdoutReporter,
    );
    poller.run(shutdown.subscribe()).await;

    Ok(())
}
