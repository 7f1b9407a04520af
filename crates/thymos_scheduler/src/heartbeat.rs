//! Periodic heartbeat driving the consciousness loop.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Fires a callback every `interval`, unboundedly, until stopped.
///
/// Each invocation is independent: if the callback fails, the failure is
/// logged and counted, and the interval timer continues.
pub struct Heartbeat {
    interval: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
    stop_tx: watch::Sender<bool>,
    failures: Arc<AtomicU64>,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        let (stop_tx, _stop_rx) = watch::channel(false);
        Self {
            interval,
            handle: Mutex::new(None),
            stop_tx,
            failures: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start firing `callback` every interval. No-op if already running.
    pub fn start<F, Fut>(&self, callback: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let mut guard = self.handle.lock().expect("heartbeat handle lock poisoned");
        if guard.as_ref().is_some_and(|h| !h.is_finished()) {
            tracing::debug!("heartbeat already running, start ignored");
            return;
        }

        self.stop_tx.send_replace(false);
        let mut stop_rx = self.stop_tx.subscribe();
        let interval = self.interval;
        let failures = Arc::clone(&self.failures);
        *guard = Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(interval) => {
                        // Runs outside the select's cancellation scope: a
                        // stop request arriving here is observed on the next
                        // loop iteration, after the callback completes.
                        if let Err(e) = callback().await {
                            failures.fetch_add(1, Ordering::Relaxed);
                            tracing::warn!("heartbeat callback failed: {e}");
                        }
                    }
                }
            }
        }));
    }

    /// Cancel the pending firing. An in-flight callback invocation runs to
    /// completion; only the next firing is cancelled. Stopping a non-running
    /// heartbeat is a no-op.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_running(&self) -> bool {
        !*self.stop_tx.borrow()
            && self
                .handle
                .lock()
                .expect("heartbeat handle lock poisoned")
                .as_ref()
                .is_some_and(|h| !h.is_finished())
    }

    /// Number of callback invocations that returned an error.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_per_interval() {
        let heartbeat = Heartbeat::new(Duration::from_secs(1));
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        heartbeat.start(move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_millis(5500)).await;
        heartbeat.stop();
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_failure_is_swallowed() {
        let heartbeat = Heartbeat::new(Duration::from_secs(1));
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        heartbeat.start(move || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    anyhow::bail!("first tick fails");
                }
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_millis(3500)).await;
        heartbeat.stop();
        // The failing first tick did not stop subsequent firings.
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(heartbeat.failure_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_noop() {
        let heartbeat = Heartbeat::new(Duration::from_secs(1));
        let count = Arc::new(AtomicU32::new(0));

        for _ in 0..2 {
            let c = Arc::clone(&count);
            heartbeat.start(move || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }

        tokio::time::sleep(Duration::from_millis(2500)).await;
        heartbeat.stop();
        // Only one driver was ever running.
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_firing() {
        let heartbeat = Heartbeat::new(Duration::from_secs(10));
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        heartbeat.start(move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_secs(5)).await;
        heartbeat.stop();
        assert!(!heartbeat.is_running());

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_lets_in_flight_callback_finish() {
        let heartbeat = Heartbeat::new(Duration::from_secs(1));
        let started = Arc::new(AtomicU32::new(0));
        let finished = Arc::new(AtomicU32::new(0));

        let s = Arc::clone(&started);
        let f = Arc::clone(&finished);
        heartbeat.start(move || {
            let s = Arc::clone(&s);
            let f = Arc::clone(&f);
            async move {
                s.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(2)).await;
                f.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        // First firing at t=1s; stop mid-callback at t=1.5s.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        heartbeat.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;

        // The in-flight invocation completed; no further firing started.
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert!(!heartbeat.is_running());
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let heartbeat = Heartbeat::new(Duration::from_secs(1));
        heartbeat.stop();
        assert!(!heartbeat.is_running());
    }
}
