//! Task arbitration: pick one task from the plan, emotion-aware.

use thymos_core::{Plan, Task};
use thymos_emotion::EmotionSnapshot;

/// Selects the next task from a candidate plan.
///
/// A pure decision given `(plan, emotion snapshot, last action)`; the only
/// state carried between calls is the action most recently selected.
#[derive(Debug, Default)]
pub struct TaskArbiter {
    last_action: Option<String>,
}

impl TaskArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next task.
    ///
    /// Empty plan → `None`. Under high frustration, the plan is scanned in
    /// order for the first task whose action differs from the last selected
    /// one — repeated failure should change behavior, not retry the same
    /// failing action type. Otherwise the plan head wins. A single-task plan
    /// under frustration still returns that task: there is no alternative.
    pub fn select_task(&mut self, plan: &Plan, emotion: &EmotionSnapshot) -> Option<Task> {
        let first = plan.first()?;

        if emotion.is_frustrated() {
            if let Some(different) = plan
                .iter()
                .find(|task| Some(task.action.as_str()) != self.last_action.as_deref())
            {
                tracing::debug!(
                    action = %different.action,
                    frustration = emotion.frustration,
                    "frustration-driven diversification"
                );
                self.last_action = Some(different.action.clone());
                return Some(different.clone());
            }
        }

        self.last_action = Some(first.action.clone());
        Some(first.clone())
    }

    /// The action most recently selected, if any.
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thymos_emotion::{EmotionEngine, EventImpact};

    fn calm() -> EmotionSnapshot {
        EmotionEngine::default().snapshot()
    }

    fn frustrated() -> EmotionSnapshot {
        let mut engine = EmotionEngine::default();
        engine.apply_event(&EventImpact::mood(-1.0));
        engine.apply_event(&EventImpact::mood(-1.0));
        let snap = engine.snapshot();
        assert!(snap.is_frustrated());
        snap
    }

    fn plan(actions: &[&str]) -> Plan {
        actions.iter().map(|a| Task::new(a)).collect()
    }

    #[test]
    fn test_empty_plan_returns_none() {
        let mut arbiter = TaskArbiter::new();
        assert!(arbiter.select_task(&plan(&[]), &calm()).is_none());
        assert!(arbiter.select_task(&plan(&[]), &frustrated()).is_none());
    }

    #[test]
    fn test_calm_selects_plan_head_regardless_of_last_action() {
        let mut arbiter = TaskArbiter::new();
        let p = plan(&["tweet", "follow"]);

        let first = arbiter.select_task(&p, &calm()).unwrap();
        assert_eq!(first.action, "tweet");
        // Same head again even though "tweet" was just selected.
        let second = arbiter.select_task(&p, &calm()).unwrap();
        assert_eq!(second.action, "tweet");
    }

    #[test]
    fn test_frustration_diversifies_in_plan_order() {
        let mut arbiter = TaskArbiter::new();
        let p = plan(&["tweet", "tweet", "follow"]);

        // Establish "tweet" as the last action.
        arbiter.select_task(&p, &calm());
        assert_eq!(arbiter.last_action(), Some("tweet"));

        let picked = arbiter.select_task(&p, &frustrated()).unwrap();
        assert_eq!(picked.action, "follow");
        assert_eq!(arbiter.last_action(), Some("follow"));
    }

    #[test]
    fn test_frustration_with_no_prior_action_picks_head() {
        let mut arbiter = TaskArbiter::new();
        let p = plan(&["tweet", "follow"]);

        // No last action: the head already "differs".
        let picked = arbiter.select_task(&p, &frustrated()).unwrap();
        assert_eq!(picked.action, "tweet");
    }

    #[test]
    fn test_single_task_plan_under_frustration_returns_it() {
        let mut arbiter = TaskArbiter::new();
        let p = plan(&["tweet"]);

        arbiter.select_task(&p, &calm());
        // Frustrated, but no alternative exists: still "tweet".
        let picked = arbiter.select_task(&p, &frustrated()).unwrap();
        assert_eq!(picked.action, "tweet");
    }
}
