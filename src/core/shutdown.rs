//! Shutdown Coordination
//!
//! Cooperative cancellation: a signal sets a flag that workers observe
//! between work items, plus a broadcast channel for tasks blocked on IO.
//! No in-flight analysis is preempted; a second signal forces an exit.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Coordinates graceful shutdown across workers
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a coordinator with no signal handlers attached
    pub fn new() -> Self {
        // Larger channel so bursts of signals are not dropped.
        let (shutdown_tx, _) = broadcast::channel(8);
        Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a coordinator and attach process signal handlers
    ///
    /// Must be called from within a tokio runtime.
    pub fn install() -> Self {
        let coordinator = Self::new();
        setup_signal_handlers(
            coordinator.shutdown_tx.clone(),
            coordinator.shutdown_requested.clone(),
        );
        coordinator
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Request shutdown
    pub fn trigger_shutdown(&self) {
        // Release store pairs with the Acquire load in
        // is_shutdown_requested().
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    /// Check whether shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        let signals = [
            SignalKind::interrupt(),
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ];

        for kind in signals {
            let tx = shutdown_tx.clone();
            let requested = shutdown_requested.clone();
            let count = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        let prev = count.fetch_add(1, Ordering::AcqRel);
                        requested.store(true, Ordering::Release);
                        let _ = tx.send(());
                        if prev >= 1 {
                            // Second signal: the operator wants out now.
                            std::process::exit(130);
                        }
                    }
                }
            });
        }
    }

    // Generic ctrl_c fallback for terminals where the specific signals are
    // not delivered as expected (and the only path on non-unix targets).
    {
        let tx = shutdown_tx;
        let requested = shutdown_requested;
        let count = signal_count;
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let prev = count.fetch_add(1, Ordering::AcqRel);
                requested.store(true, Ordering::Release);
                let _ = tx.send(());
                if prev >= 1 {
                    log::warn!("Ctrl-C received again; exiting");
                    std::process::exit(130);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_starts_unrequested() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutdown_requested());
    }

    #[tokio::test]
    async fn test_trigger_sets_flag_and_notifies() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();

        coordinator.trigger_shutdown();

        assert!(coordinator.is_shutdown_requested());
        let notified = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(notified.is_ok(), "subscriber should see the shutdown signal");
    }

    #[tokio::test]
    async fn test_all_subscribers_are_notified() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx1 = coordinator.subscribe();
        let mut rx2 = coordinator.subscribe();

        coordinator.trigger_shutdown();

        assert!(timeout(Duration::from_millis(100), rx1.recv()).await.is_ok());
        assert!(timeout(Duration::from_millis(100), rx2.recv()).await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_shutdown_state() {
        let coordinator = ShutdownCoordinator::new();
        let clone = coordinator.clone();

        clone.trigger_shutdown();
        assert!(coordinator.is_shutdown_requested());
    }
}
