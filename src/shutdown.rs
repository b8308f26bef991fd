use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ShutdownPhase {
    Running = 0,
    Signaled = 1,
    StoppingUpstream = 2,
    RestoringTerminal = 3,
    Complete = 4,
}

impl ShutdownPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ShutdownPhase::Running,
            1 => ShutdownPhase::Signaled,
            2 => ShutdownPhase::StoppingUpstream,
            3 => ShutdownPhase::RestoringTerminal,
            _ => ShutdownPhase::Complete,
        }
    }
}

/// Owned by the runtime; upstream tasks get a [`ShutdownHandle`].
pub struct ShutdownCoordinator {
    shutdown: Arc<AtomicBool>,
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            phase: Arc::new(AtomicU8::new(ShutdownPhase::Running as u8)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn signal(&self) {
        self.handle().signal();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> ShutdownPhase {
        ShutdownPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn advance(&self, phase: ShutdownPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        tracing::debug!(?phase, "shutdown phase");
    }

    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
            phase: Arc::clone(&self.phase),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            let _ = self.phase.compare_exchange(
                ShutdownPhase::Running as u8,
                ShutdownPhase::Signaled as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            );
            tracing::info!("shutdown requested");
            self.notify.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        // Register interest before checking the flag so a signal landing in
        // between is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn signal_moves_to_signaled_once() {
        let coordinator = ShutdownCoordinator::new();
        assert_eq!(coordinator.phase(), ShutdownPhase::Running);
        coordinator.signal();
        coordinator.signal();
        assert!(coordinator.is_shutting_down());
        assert_eq!(coordinator.phase(), ShutdownPhase::Signaled);
        coordinator.advance(ShutdownPhase::Complete);
        assert_eq!(coordinator.phase(), ShutdownPhase::Complete);
    }

    #[tokio::test]
    async fn wait_returns_after_signal() {
        let coordinator = ShutdownCoordinator::new();
        let handle = coordinator.handle();
        let waiter = tokio::spawn(async move { handle.wait().await });
        tokio::task::yield_now().await;
        coordinator.signal();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .expect("join");
    }

    #[tokio::test]
    async fn wait_after_signal_is_immediate() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.signal();
        coordinator.handle().wait().await;
    }
}
