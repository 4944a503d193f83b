//! Consumer subsystem: polls the producer and reports each number.
//!
//! # Data Flow
//! ```text
//! Poller::run
//!     → client.rs (GET /number with timeout)
//!     → error.rs (transport / payload / unexpected)
//!     → Reporter (one console line per iteration)
//!     → sleep(interval) → repeat
//! ```

pub mod client;
pub mod error;
pub mod poller;

pub use client::{endpoint_url, NumberClient, NumberSource};
pub use error::{FailureKind, FetchError};
pub use poller::{PollOutcome, Poller, Reporter, StdoutReporter};
