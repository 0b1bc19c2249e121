//! Cooperative cancellation for a crawl run
//!
//! The signal is raised once (by Ctrl+C or by a caller holding a clone) and
//! never lowered. The scheduler checks it before admitting work and waits
//! on it while draining a level.

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable, one-shot shutdown flag
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    state: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Raises the signal; later calls are no-ops
    pub fn raise(&self) {
        self.state.send_if_modified(|raised| {
            let changed = !*raised;
            *raised = true;
            changed
        });
    }

    pub fn is_raised(&self) -> bool {
        *self.state.borrow()
    }

    /// Completes once the signal has been raised
    pub async fn raised(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail while awaited
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_lowered() {
        assert!(!ShutdownSignal::new().is_raised());
    }

    #[test]
    fn test_raise_is_visible_to_clones() {
        let signal = ShutdownSignal::new();
        let clone = signal.clone();
        clone.raise();
        clone.raise();
        assert!(signal.is_raised());
    }

    #[tokio::test]
    async fn test_raised_wakes_waiters() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.raised().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        signal.raise();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter was not woken")
            .unwrap();
    }

    #[tokio::test]
    async fn test_raised_returns_immediately_when_already_raised() {
        let signal = ShutdownSignal::new();
        signal.raise();
        tokio::time::timeout(Duration::from_millis(100), signal.raised())
            .await
            .expect("already-raised signal blocked");
    }
}
