//! Self-reflection: summarize a history window into a reflective insight.

use crate::memory::ReflectiveMemory;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use thymos_core::ActionRecord;

pub struct SelfReflector {
    memory: Arc<ReflectiveMemory>,
}

impl SelfReflector {
    pub fn new(memory: Arc<ReflectiveMemory>) -> Self {
        Self { memory }
    }

    /// Derive one summary insight from the action/outcome window and append
    /// it to reflective memory. Deterministic; needs no generator.
    pub async fn reflect(&self, window: &[ActionRecord]) {
        if window.is_empty() {
            return;
        }

        let successes = window.iter().filter(|r| r.outcome.success).count();
        let failures = window.len() - successes;

        let mut failures_by_action: BTreeMap<&str, usize> = BTreeMap::new();
        for record in window.iter().filter(|r| !r.outcome.success) {
            *failures_by_action.entry(record.action.as_str()).or_default() += 1;
        }
        let worst = failures_by_action
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(action, count)| (action.to_string(), *count));

        let mut text = format!(
            "Over the last {} actions: {} succeeded, {} failed.",
            window.len(),
            successes,
            failures
        );
        if let Some((action, count)) = &worst {
            text.push_str(&format!(
                " The most failure-prone action was '{action}' ({count} failures)."
            ));
        }

        let actions: Vec<&str> = window.iter().map(|r| r.action.as_str()).collect();
        self.memory
            .add_insight(
                &text,
                json!({
                    "type": "reflection",
                    "window": window.len(),
                    "successes": successes,
                    "failures": failures,
                    "actions": actions,
                }),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thymos_core::Outcome;

    fn record(action: &str, success: bool) -> ActionRecord {
        let outcome = if success {
            Outcome::success("ok")
        } else {
            Outcome::failure("nope")
        };
        ActionRecord::new(0, action, outcome)
    }

    #[tokio::test]
    async fn test_reflect_summarizes_window() {
        let memory = Arc::new(ReflectiveMemory::new());
        let reflector = SelfReflector::new(Arc::clone(&memory));

        reflector
            .reflect(&[
                record("tweet", false),
                record("tweet", false),
                record("follow", true),
            ])
            .await;

        let all = memory.all().await;
        assert_eq!(all.len(), 1);
        assert!(all[0].text.contains("3 actions"));
        assert!(all[0].text.contains("2 failed"));
        assert!(all[0].text.contains("'tweet'"));
        assert_eq!(all[0].metadata["type"], "reflection");
    }

    #[tokio::test]
    async fn test_empty_window_adds_nothing() {
        let memory = Arc::new(ReflectiveMemory::new());
        let reflector = SelfReflector::new(Arc::clone(&memory));
        reflector.reflect(&[]).await;
        assert!(memory.is_empty().await);
    }
}
