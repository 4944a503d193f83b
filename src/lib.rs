//! Random number relay: a producer service and a polling consumer.
//!
//! # Architecture Overview
//!
//! ```text
//!   number-consumer                               number-producer
//!  ┌──────────────────────────┐               ┌────────────────────────────┐
//!  │ Poller                   │  GET /number  │ HttpServer (axum)          │
//!  │  └ NumberClient ─────────┼──────────────▶│  └ number handler          │
//!  │     (reqwest, timeout)   │               │     └ NumberGenerator      │
//!  │ Reporter ◀───────────────┼───────────────┤  {"number": N}             │
//!  │  "Received number: N"    │               │                            │
//!  └──────────────────────────┘               └────────────────────────────┘
//!
//!  Cross-cutting: config (TOML + CLI), observability (tracing, metrics),
//!                 lifecycle (startup, signals, shutdown)
//! ```

pub mod config;
pub mod consumer;
pub mod generator;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use consumer::{NumberClient, Poller};
pub use generator::NumberGenerator;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
