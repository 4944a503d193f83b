//! The consumer's polling loop.
//!
//! # Responsibilities
//! - Fetch once per iteration and report the outcome
//! - Sleep the fixed interval after every iteration, success or failure
//! - Contain every failure inside its iteration
//!
//! # Design Decisions
//! - One outstanding request at a time
//! - The fetch runs in its own task so a panic surfaces as a `JoinError`
//!   and is reported as an unexpected failure instead of ending the loop
//! - No retry count or backoff: the interval is constant

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use crate::consumer::client::NumberSource;
use crate::consumer::error::{FailureKind, FetchError};
use crate::observability::metrics;

/// Result of one poll iteration.
#[derive(Debug)]
pub enum PollOutcome {
    Received(u32),
    Failed(FetchError),
}

impl PollOutcome {
    /// Metrics label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            PollOutcome::Received(_) => "received",
            PollOutcome::Failed(e) => e.kind().as_str(),
        }
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollOutcome::Received(number) => write!(f, "Received number: {number}"),
            PollOutcome::Failed(e) => write!(f, "Error fetching the number: {e}"),
        }
    }
}

/// Sink for poll outcomes.
pub trait Reporter: Send + Sync + 'static {
    fn report(&self, outcome: &PollOutcome);
}

/// Prints one line per outcome to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&self, outcome: &PollOutcome) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not worth stopping the loop for.
        let _ = writeln!(out, "{outcome}");
        let _ = out.flush();
    }
}

/// Polls a [`NumberSource`] on a fixed interval.
pub struct Poller<S, R> {
    source: Arc<S>,
    interval: Duration,
    reporter: R,
}

impl<S: NumberSource, R: Reporter> Poller<S, R> {
    pub fn new(source: S, interval: Duration, reporter: R) -> Self {
        Self {
            source: Arc::new(source),
            interval,
            reporter,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one fetch and classify its result.
    pub async fn poll_once(&self) -> PollOutcome {
        let started = Instant::now();
        let source = Arc::clone(&self.source);

        let result = match tokio::spawn(async move { source.fetch().await }).await {
            Ok(result) => result,
            Err(join_error) => Err(FetchError::Unexpected(join_error.to_string())),
        };

        let outcome = match result {
            Ok(number) => PollOutcome::Received(number),
            Err(e) => PollOutcome::Failed(e),
        };
        metrics::record_poll(outcome.label(), started);
        outcome
    }

    /// Poll forever, until `shutdown` fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval = ?self.interval, "Poller starting");

        loop {
            let outcome = tokio::select! {
                outcome = self.poll_once() => outcome,
                _ = shutdown.recv() => break,
            };

            log_outcome(&outcome);
            self.reporter.report(&outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!("Poller stopped");
    }
}

fn log_outcome(outcome: &PollOutcome) {
    match outcome {
        PollOutcome::Received(number) => tracing::debug!(number, "Received number"),
        PollOutcome::Failed(e) => match e.kind() {
            FailureKind::Transport | FailureKind::Payload => tracing::warn!(
                kind = %e.kind(),
                timeout = e.is_timeout(),
                error = %e,
                "Fetch failed"
            ),
            FailureKind::Unexpected => tracing::error!(
                kind = %e.kind(),
                error = %e,
                "Unexpected fault while fetching"
            ),
        },
    }
}
