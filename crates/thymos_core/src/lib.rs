//! # Thymos Core
//!
//! Shared vocabulary of the Thymos agent: tasks, outcomes, the action/outcome
//! history record, and the narrow collaborator traits through which the
//! decision core talks to the outside world (text generation, task execution,
//! planning, persistence).
//!
//! The decision core itself performs no network or disk I/O. Everything slow
//! or fallible lives behind the traits defined here.

pub mod config;
pub mod context;
pub mod error;
pub mod governance;

pub use config::ThymosConfig;
pub use context::SituationalContext;
pub use error::ThymosError;
pub use governance::{Constitution, GovernanceStore, Strategy};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of plannable work: an action name plus free-form parameters.
///
/// Tasks are immutable once enqueued. The action name is resolved against
/// the executor registry at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub action: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl Task {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            parameters: serde_json::Value::Null,
        }
    }

    pub fn with_parameters(action: &str, parameters: serde_json::Value) -> Self {
        Self {
            action: action.to_string(),
            parameters,
        }
    }
}

/// An ordered candidate list of tasks for one arbitration decision.
pub type Plan = Vec<Task>;

/// Result of executing one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub details: String,
}

impl Outcome {
    pub fn success(details: &str) -> Self {
        Self {
            success: true,
            details: details.to_string(),
        }
    }

    pub fn failure(details: &str) -> Self {
        Self {
            success: false,
            details: details.to_string(),
        }
    }
}

/// One entry of the action/outcome history consumed by meta-governance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: Uuid,
    /// Tick counter value when the outcome was recorded. Execution is
    /// asynchronous, so this may be later than the tick that enqueued the
    /// task.
    pub tick: u64,
    pub action: String,
    pub outcome: Outcome,
    pub recorded_at: DateTime<Utc>,
}

impl ActionRecord {
    pub fn new(tick: u64, action: &str, outcome: Outcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            tick,
            action: action.to_string(),
            outcome,
            recorded_at: Utc::now(),
        }
    }
}

/// Text-generation collaborator (prompt in, completion out).
///
/// Callers must treat every method as best-effort: a failing generator
/// degrades the calling step, it never propagates past meta-governance.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;

    /// Streaming variant: yields incremental chunks over a channel.
    async fn generate_stream(
        &self,
        prompt: &str,
    ) -> anyhow::Result<tokio::sync::mpsc::Receiver<String>>;
}

/// Task-execution collaborator. Errors are converted to failure Outcomes at
/// the dispatch boundary and must never crash the queue consumer.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, task: &Task) -> anyhow::Result<Outcome>;
}

/// Supplies the situational context and the current plan read by the
/// consciousness loop each tick. Read-only from the core's perspective.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    async fn situational_context(&self) -> SituationalContext;
    async fn current_plan(&self) -> Plan;
}

/// Persistence collaborator: receives the revised strategy and principles at
/// the end of an upgrade cycle, plus periodic affective telemetry snapshots.
/// A structured (field-named) representation is sufficient; no binary format
/// is mandated here.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn persist_strategy(&self, strategy: &Strategy) -> anyhow::Result<()>;
    async fn persist_principles(&self, principles: &Constitution) -> anyhow::Result<()>;
    async fn persist_snapshot(&self, snapshot: serde_json::Value) -> anyhow::Result<()>;
}
