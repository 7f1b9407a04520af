//! The consciousness loop: the top-level driver of the agent.
//!
//! One tick runs `Idle → Sensing → Selecting → Executing →
//! ReflectingOutcome → Idle`. Shutdown is only observed at the tick
//! boundary, so a tick always completes atomically with respect to stop
//! requests. Task execution happens asynchronously on the task queue; its
//! outcome is fed back into the emotion engine and the history log by the
//! queue consumer.

use crate::arbiter::TaskArbiter;
use crate::history::HistoryLog;
use crate::registry::ExecutorRegistry;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thymos_core::{ActionRecord, Outcome, PlanProvider, Task};
use thymos_emotion::{EmotionEngine, EventImpact};
use thymos_scheduler::{Heartbeat, TaskQueue};
use tokio::sync::{mpsc, watch, Mutex, RwLock};
use tokio::task::JoinHandle;

/// Mood lift from a successful task.
const SUCCESS_MOOD_IMPACT: f32 = 0.2;
/// Mood hit from a failed task; feeds frustration through the engine.
const FAILURE_MOOD_IMPACT: f32 = -0.3;
/// Energy cost of doing any work at all.
const WORK_ENERGY_COST: f32 = -0.05;

/// Map a task outcome onto an emotional impact.
pub fn outcome_impact(outcome: &Outcome) -> EventImpact {
    let mood = if outcome.success {
        SUCCESS_MOOD_IMPACT
    } else {
        FAILURE_MOOD_IMPACT
    };
    EventImpact::mood(mood).with_energy(WORK_ENERGY_COST)
}

/// Phase of the current tick, broadcast for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Idle,
    Sensing,
    Selecting,
    Executing,
    ReflectingOutcome,
}

/// Events the loop hands back to its owner for processing.
#[derive(Debug)]
pub enum MindEvent {
    /// The upgrade cadence elapsed; the owner should run a meta-governance
    /// cycle over the drained history window.
    UpgradeDue { window: Vec<ActionRecord> },
}

pub struct ConsciousnessLoop {
    emotion: Arc<RwLock<EmotionEngine>>,
    arbiter: Mutex<TaskArbiter>,
    queue: Arc<TaskQueue>,
    registry: Arc<ExecutorRegistry>,
    provider: Arc<dyn PlanProvider>,
    history: Arc<HistoryLog>,
    tick: AtomicU64,
    alive: AtomicBool,
    phase_tx: watch::Sender<TickPhase>,
    upgrade_every: u64,
    events_tx: mpsc::Sender<MindEvent>,
}

impl ConsciousnessLoop {
    /// Create a new loop.
    ///
    /// Returns `(loop, receiver)` — the receiver yields [`MindEvent`]s the
    /// caller should handle (e.g. feed into the upgrade engine).
    pub fn new(
        emotion: Arc<RwLock<EmotionEngine>>,
        queue: Arc<TaskQueue>,
        registry: Arc<ExecutorRegistry>,
        provider: Arc<dyn PlanProvider>,
        upgrade_every: u64,
    ) -> (Self, mpsc::Receiver<MindEvent>) {
        let (events_tx, events_rx) = mpsc::channel(16);
        let (phase_tx, _) = watch::channel(TickPhase::Idle);
        let me = Self {
            emotion,
            arbiter: Mutex::new(TaskArbiter::new()),
            queue,
            registry,
            provider,
            history: Arc::new(HistoryLog::new()),
            tick: AtomicU64::new(0),
            alive: AtomicBool::new(true),
            phase_tx,
            upgrade_every,
            events_tx,
        };
        (me, events_rx)
    }

    /// Run one tick: sense, arbitrate, enqueue, decay.
    ///
    /// A tick with no available task still advances the counter and runs
    /// decay, and never calls the executor.
    pub async fn tick(&self) {
        if !self.alive.load(Ordering::SeqCst) {
            return;
        }
        let tick = self.tick.fetch_add(1, Ordering::SeqCst) + 1;

        self.set_phase(TickPhase::Sensing);
        let context = self.provider.situational_context().await;
        let plan = self.provider.current_plan().await;
        tracing::trace!(
            tick,
            context_entries = context.len(),
            plan_len = plan.len(),
            "sensing"
        );

        self.set_phase(TickPhase::Selecting);
        let snapshot = self.emotion.read().await.snapshot();
        let selected = self.arbiter.lock().await.select_task(&plan, &snapshot);

        self.set_phase(TickPhase::Executing);
        if let Some(task) = selected {
            tracing::debug!(tick, action = %task.action, "dispatching task");
            self.queue.enqueue(task);
        }

        self.set_phase(TickPhase::ReflectingOutcome);
        // Exactly once per tick, regardless of outcome: without this,
        // frustration and mood would accumulate without bound.
        self.emotion.write().await.decay();
        self.set_phase(TickPhase::Idle);

        if self.upgrade_every > 0 && tick % self.upgrade_every == 0 {
            // Reserve the event slot before draining: the window must stay
            // in the history log when it cannot be delivered.
            match self.events_tx.try_reserve() {
                Ok(permit) => {
                    let window = self.history.take_all().await;
                    permit.send(MindEvent::UpgradeDue { window });
                }
                Err(mpsc::error::TrySendError::Full(())) => {
                    tracing::warn!("mind event channel full, deferring upgrade window");
                }
                Err(mpsc::error::TrySendError::Closed(())) => {
                    tracing::debug!("mind event receiver dropped");
                }
            }
        }
    }

    /// Queue-consumer handler for one dequeued task: dispatch through the
    /// registry, record the outcome, feed it back into the emotion engine.
    ///
    /// Executor failures arrive here already converted to failure Outcomes;
    /// the only error this returns is an unknown-action lookup, which is a
    /// config mistake the queue consumer logs and skips past.
    pub async fn handle_task(&self, task: Task) -> anyhow::Result<()> {
        let outcome = self.registry.dispatch(&task).await?;
        tracing::debug!(action = %task.action, success = outcome.success, "task completed");

        self.emotion.write().await.apply_event(&outcome_impact(&outcome));
        self.history
            .record(ActionRecord::new(
                self.tick.load(Ordering::SeqCst),
                &task.action,
                outcome,
            ))
            .await;
        Ok(())
    }

    /// Drive ticks from the given heartbeat.
    pub fn attach_heartbeat(self: &Arc<Self>, heartbeat: &Heartbeat) {
        let me = Arc::clone(self);
        heartbeat.start(move || {
            let me = Arc::clone(&me);
            async move {
                me.tick().await;
                Ok(())
            }
        });
    }

    /// Spawn the single queue-consumer loop dispatching enqueued tasks.
    pub fn spawn_dispatcher(self: &Arc<Self>) -> JoinHandle<()> {
        let me = Arc::clone(self);
        tokio::spawn(async move {
            let worker = Arc::clone(&me);
            me.queue
                .run(move |task| {
                    let worker = Arc::clone(&worker);
                    async move { worker.handle_task(task).await }
                })
                .await;
        })
    }

    /// External stop request: the current tick completes, no further tick
    /// starts, and the queue consumer halts after its current item.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.queue.stop();
        tracing::info!("consciousness loop shutdown requested");
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Monotonic tick counter: increments exactly once per heartbeat
    /// invocation, never resets during a run.
    pub fn tick_count(&self) -> u64 {
        self.tick.load(Ordering::SeqCst)
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<TickPhase> {
        self.phase_tx.subscribe()
    }

    pub fn history(&self) -> Arc<HistoryLog> {
        Arc::clone(&self.history)
    }

    fn set_phase(&self, phase: TickPhase) {
        let _ = self.phase_tx.send(phase);
    }
}
