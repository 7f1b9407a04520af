//! Daily sleep/wake gate.
//!
//! Evaluates the current time-of-day on a fixed polling period and invokes
//! an on-wake or on-sleep callback depending on whether the time falls in
//! `[wake, sleep)`. Level-triggered: the callback for the current state is
//! re-invoked every poll, so callers must be idempotent.

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use thymos_core::config::SleepWakeConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// True iff `now` falls in the awake window `[wake, sleep)`.
///
/// Overnight schedules (sleep before wake, e.g. wake 22:00 / sleep 06:00)
/// wrap around midnight.
pub fn in_wake_window(now: NaiveTime, wake: NaiveTime, sleep: NaiveTime) -> bool {
    if wake <= sleep {
        now >= wake && now < sleep
    } else {
        now >= wake || now < sleep
    }
}

pub struct SleepWakeGate {
    wake: NaiveTime,
    sleep: NaiveTime,
    poll: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
    stop_tx: watch::Sender<bool>,
}

impl SleepWakeGate {
    pub fn new(wake: NaiveTime, sleep: NaiveTime) -> Self {
        Self::with_poll(wake, sleep, Duration::from_secs(60))
    }

    /// Custom polling period, mainly for tests.
    pub fn with_poll(wake: NaiveTime, sleep: NaiveTime, poll: Duration) -> Self {
        let (stop_tx, _stop_rx) = watch::channel(false);
        Self {
            wake,
            sleep,
            poll,
            handle: Mutex::new(None),
            stop_tx,
        }
    }

    /// Build from the `[sleep_wake]` config section ("HH:MM" times).
    pub fn from_config(cfg: &SleepWakeConfig) -> Result<Self> {
        let wake = NaiveTime::parse_from_str(&cfg.wake, "%H:%M")
            .with_context(|| format!("invalid wake time '{}'", cfg.wake))?;
        let sleep = NaiveTime::parse_from_str(&cfg.sleep, "%H:%M")
            .with_context(|| format!("invalid sleep time '{}'", cfg.sleep))?;
        Ok(Self::with_poll(wake, sleep, Duration::from_secs(cfg.poll_secs)))
    }

    /// Start polling. No-op if already running. Callback failures are logged
    /// and swallowed; the poller continues.
    pub fn start<W, WFut, S, SFut>(&self, on_wake: W, on_sleep: S)
    where
        W: Fn() -> WFut + Send + Sync + 'static,
        WFut: Future<Output = anyhow::Result<()>> + Send + 'static,
        S: Fn() -> SFut + Send + Sync + 'static,
        SFut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let mut guard = self.handle.lock().expect("sleep/wake handle lock poisoned");
        if guard.as_ref().is_some_and(|h| !h.is_finished()) {
            tracing::debug!("sleep/wake gate already running, start ignored");
            return;
        }

        self.stop_tx.send_replace(false);
        let mut stop_rx = self.stop_tx.subscribe();
        let (wake, sleep, poll) = (self.wake, self.sleep, self.poll);
        *guard = Some(tokio::spawn(async move {
            loop {
                let now = Local::now().time();
                let result = if in_wake_window(now, wake, sleep) {
                    on_wake().await
                } else {
                    on_sleep().await
                };
                if let Err(e) = result {
                    tracing::warn!("sleep/wake callback failed: {e}");
                }
                // Stop requests arriving during a callback are observed
                // here, after it completes; during the poll sleep they
                // cancel only the pending evaluation.
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(poll) => {}
                }
            }
        }));
    }

    /// Cancel the pending poll. An in-flight callback invocation runs to
    /// completion. No-op when not running.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_running(&self) -> bool {
        !*self.stop_tx.borrow()
            && self
                .handle
                .lock()
                .expect("sleep/wake handle lock poisoned")
                .as_ref()
                .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SleepWakeGate {
    fn drop(&mut self) {
        self.stop();
    }
}
