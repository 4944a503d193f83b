//! Shutdown coordination between the signal listener and the long-running
//! tasks: `HttpServer::run` drains its connections, `Poller::run` leaves its
//! loop at the next await point (mid-fetch or mid-sleep).

use tokio::sync::broadcast;

/// One-shot stop signal fanned out over a broadcast channel.
///
/// Subscribe before spawning the task that waits on it; a receiver created
/// after [`Shutdown::trigger`] never sees the signal. Clones share the channel,
/// so the signal listener can own one while `main` keeps another.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a server or poller task.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop every subscribed task. Harmless with no subscribers.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers not yet dropped, i.e. tasks that have not finished.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
