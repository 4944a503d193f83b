//! Configuration schema definitions.
//!
//! This module defines the configuration structure for both processes.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the producer and consumer binaries.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Producer (HTTP server) settings.
    pub producer: ProducerConfig,

    /// Consumer (poller) settings.
    pub consumer: ConsumerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Producer service configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProducerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Range and seeding of generated numbers.
    pub numbers: NumberRangeConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Replace the host and/or port of the bind address, keeping the other part.
    pub fn override_host_port(&mut self, host: Option<String>, port: Option<u16>) {
        if host.is_none() && port.is_none() {
            return;
        }

        let (current_host, current_port) = split_host_port(&self.bind_address)
            .unwrap_or_else(|| ("0.0.0.0".to_string(), 5000));
        let host = host.unwrap_or(current_host);
        let port = port.unwrap_or(current_port);

        self.bind_address = if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
    }
}

/// Split `host:port` or `[v6]:port`, keeping host names unresolved.
fn split_host_port(addr: &str) -> Option<(String, u16)> {
    let (host, port) = addr.rsplit_once(':')?;
    let port = port.parse().ok()?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    Some((host.to_string(), port))
}

/// Inclusive range the producer draws from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NumberRangeConfig {
    /// Smallest number that may be served.
    pub min: u32,

    /// Largest number that may be served.
    pub max: u32,

    /// Fixed seed for a reproducible sequence. Unset means thread-local entropy.
    pub seed: Option<u64>,
}

impl Default for NumberRangeConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 180,
            seed: None,
        }
    }
}

/// Timeout configuration for the producer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Consumer poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Base URL of the producer. `/number` is resolved against it.
    pub producer_url: String,

    /// Pause between iterations in seconds.
    pub interval_secs: u64,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            producer_url: "http://localhost:5000".to_string(),
            interval_secs: 3,
            timeout_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log line format on stderr.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address the metrics endpoint listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
