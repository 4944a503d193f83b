//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/number` and `/health` handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProducerConfig;
use crate::generator::NumberGenerator;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::{HealthResponse, NumberResponse};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn NumberGenerator>,
}

/// HTTP server for the producer.
pub struct HttpServer {
    router: Router,
    config: ProducerConfig,
}

impl HttpServer {
    /// Create a new HTTP server drawing numbers from `generator`.
    pub fn new(config: ProducerConfig, generator: Arc<dyn NumberGenerator>) -> Self {
        let state = AppState { generator };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProducerConfig, state: AppState) -> Router {
        Router::new()
            .route("/number", get(number_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            min = self.config.numbers.min,
            max = self.config.numbers.max,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }
}

/// Serve one freshly drawn number.
async fn number_handler(State(state): State<AppState>) -> Json<NumberResponse> {
    let number = state.generator.next_number();
    metrics::record_number_served();
    tracing::debug!(number, "Serving number");
    Json(NumberResponse { number })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
