//! Unbounded FIFO task queue with a single consumer loop.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use thymos_core::Task;
use tokio::sync::{mpsc, watch, Mutex};

/// Strictly-FIFO queue of tasks awaiting dispatch.
///
/// `enqueue` never blocks the caller. One consumer loop at a time dequeues
/// tasks and invokes the handler; a handler failure is logged and the loop
/// proceeds to the next item. `stop` halts the consumer after the current
/// item and retains everything still queued for a future `run`.
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<Task>,
    /// Parked between runs so queued items survive stop/run cycles.
    rx: Mutex<Option<mpsc::UnboundedReceiver<Task>>>,
    running: AtomicBool,
    stop_tx: watch::Sender<bool>,
    // Keeps the watch channel open while no consumer is subscribed.
    _stop_rx: watch::Receiver<bool>,
}

impl TaskQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
            running: AtomicBool::new(false),
            stop_tx,
            _stop_rx: stop_rx,
        }
    }

    /// Append a task. Never blocks, never fails while the queue is alive.
    pub fn enqueue(&self, task: Task) {
        if self.tx.send(task).is_err() {
            // Receiver only drops when the queue itself is dropped.
            tracing::debug!("enqueue on dropped queue ignored");
        }
    }

    /// Run the consumer loop until stopped. A second call while a loop is
    /// active is an idempotent no-op.
    pub async fn run<F, Fut>(&self, handler: F)
    where
        F: Fn(Task) -> Fut + Send + Sync,
        Fut: Future<Output = anyhow::Result<()>> + Send,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("task queue consumer already running, run ignored");
            return;
        }

        let mut rx = match self.rx.lock().await.take() {
            Some(rx) => rx,
            None => {
                self.running.store(false, Ordering::SeqCst);
                return;
            }
        };
        self.stop_tx.send_replace(false);
        let mut stop_rx = self.stop_tx.subscribe();

        loop {
            tokio::select! {
                biased;
                _ = stop_rx.changed() => {
                    if *stop_rx.borrow() {
                        break;
                    }
                }
                item = rx.recv() => match item {
                    Some(task) => {
                        let action = task.action.clone();
                        if let Err(e) = handler(task).await {
                            tracing::warn!("task '{action}' handler failed: {e}");
                        }
                    }
                    None => break,
                }
            }
        }

        // Park the receiver so already-enqueued items survive for a later run.
        *self.rx.lock().await = Some(rx);
        self.running.store(false, Ordering::SeqCst);
    }

    /// Halt the consumer after the current item finishes. Already-enqueued
    /// items are not discarded. No-op when no consumer is running.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
