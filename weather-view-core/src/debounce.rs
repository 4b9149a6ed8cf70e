use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer with a single pending slot.
///
/// Scheduling aborts whatever was pending, so only the action of the last call in a burst
/// runs, `delay` after that call.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn burst_runs_only_the_last_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new();

        for n in 1..=5 {
            let tx = tx.clone();
            debouncer.schedule(Duration::from_millis(400), async move {
                let _ = tx.send(n);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(rx.recv().await, Some(5));
        drop(tx);
        drop(debouncer);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn action_waits_for_the_quiet_period() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        let counter = fired.clone();
        debouncer.schedule(Duration::from_millis(400), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        let counter = fired.clone();
        debouncer.schedule(Duration::from_millis(400), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
