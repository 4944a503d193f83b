//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flags applied on top by the binaries
//!     → RelayConfig (immutable, injected once at startup)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    ConsumerConfig, ListenerConfig, LogFormat, NumberRangeConfig, ObservabilityConfig,
    ProducerConfig, RelayConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
