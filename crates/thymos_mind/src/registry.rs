//! Executor registry: action name → executor capability.
//!
//! Action names are validated at registration time; an unknown lookup is a
//! distinct error kind (a programming/config mistake, surfaced to the
//! caller), while executor failures are absorbed into failure Outcomes.

use std::collections::HashMap;
use std::sync::Arc;
use thymos_core::{Outcome, Task, TaskExecutor, ThymosError};

#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<String, Arc<dyn TaskExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor under `action`. Rejects empty names and
    /// duplicates immediately — misregistration should fail fast, not at
    /// dispatch time.
    pub fn register(
        &mut self,
        action: &str,
        executor: Arc<dyn TaskExecutor>,
    ) -> Result<(), ThymosError> {
        if action.trim().is_empty() {
            return Err(ThymosError::InvalidAction {
                action: action.to_string(),
                reason: "action name must be non-empty".to_string(),
            });
        }
        if self.executors.contains_key(action) {
            return Err(ThymosError::DuplicateAction {
                action: action.to_string(),
            });
        }
        self.executors.insert(action.to_string(), executor);
        Ok(())
    }

    pub fn is_registered(&self, action: &str) -> bool {
        self.executors.contains_key(action)
    }

    /// Dispatch a task to its registered executor.
    ///
    /// An unknown action is surfaced as `ThymosError::UnknownAction`; a
    /// failing executor is converted to a failure `Outcome` and never
    /// propagated further.
    pub async fn dispatch(&self, task: &Task) -> Result<Outcome, ThymosError> {
        let executor = self
            .executors
            .get(&task.action)
            .ok_or_else(|| ThymosError::UnknownAction {
                action: task.action.clone(),
            })?;

        match executor.execute(task).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::warn!(action = %task.action, "executor failed: {e}");
                Ok(Outcome::failure(&format!("executor error: {e}")))
            }
        }
    }
}
