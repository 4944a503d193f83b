//! Startup orchestration shared by both binaries.
//!
//! # Responsibilities
//! - Load the optional config file and apply CLI overrides
//! - Validate the merged result
//! - Initialize logging, then metrics if enabled

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::{read_config, validate_config, ConfigError, RelayConfig};
use crate::observability::{init_logging, init_metrics};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Merge file and CLI configuration and validate it.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: impl FnOnce(&mut RelayConfig),
) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RelayConfig::default(),
    };
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve configuration and bring up logging and metrics.
///
/// Must run inside a tokio runtime when metrics are enabled.
pub fn prepare(
    path: Option<&Path>,
    overrides: impl FnOnce(&mut RelayConfig),
) -> Result<RelayConfig, StartupError> {
    let config = resolve_config(path, overrides)?;
    init_logging(config.observability.log_format)?;

    if config.observability.metrics_enabled {
        // Already validated as a socket address.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            init_metrics(addr)?;
        }
    }

    Ok(config)
}
