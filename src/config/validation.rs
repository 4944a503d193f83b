//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and addresses. All problems
//! are reported together, not just the first.

use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("number range is empty: min {min} > max {max}")]
    EmptyRange { min: u32, max: u32 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid producer url {url:?}: {reason}")]
    ProducerUrl { url: String, reason: String },

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let producer = &config.producer;
    if !resolves(&producer.listener.bind_address) {
        errors.push(ValidationError::BindAddress(
            producer.listener.bind_address.clone(),
        ));
    }
    if producer.numbers.min > producer.numbers.max {
        errors.push(ValidationError::EmptyRange {
            min: producer.numbers.min,
            max: producer.numbers.max,
        });
    }
    if producer.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("producer.timeouts.request_secs"));
    }

    let consumer = &config.consumer;
    if let Err(reason) = check_producer_url(&consumer.producer_url) {
        errors.push(ValidationError::ProducerUrl {
            url: consumer.producer_url.clone(),
            reason,
        });
    }
    if consumer.interval_secs == 0 {
        errors.push(ValidationError::Zero("consumer.interval_secs"));
    }
    if consumer.timeout_secs == 0 {
        errors.push(ValidationError::Zero("consumer.timeout_secs"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `host:port` where host is an IP literal or a name the resolver knows.
fn resolves(addr: &str) -> bool {
    addr.parse::<SocketAddr>().is_ok()
        || addr
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false)
}

fn check_producer_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
