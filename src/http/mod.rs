//! HTTP protocol handling for the producer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → number handler draws from the generator
//!     → response.rs (JSON payload)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{HealthResponse, NumberResponse};
pub use server::HttpServer;
