//! Self-criticism: generated critiques of individual action/outcome pairs.

use crate::memory::{ReflectiveInsight, ReflectiveMemory};
use serde_json::json;
use std::sync::Arc;
use thymos_core::{ActionRecord, TextGenerator};

pub struct SelfCritic {
    generator: Arc<dyn TextGenerator>,
    memory: Arc<ReflectiveMemory>,
}

impl SelfCritic {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: Arc<ReflectiveMemory>) -> Self {
        Self { generator, memory }
    }

    /// Ask the generator to critique one action against its outcome and
    /// append the critique to reflective memory. Best-effort: a generation
    /// failure is logged and skipped.
    pub async fn critique_record(&self, record: &ActionRecord) -> Option<String> {
        let prompt = format!(
            "Provide a critical analysis of the following action and outcome:\n\
             Action: {}\nOutcome: {} ({})\n",
            record.action,
            if record.outcome.success { "success" } else { "failure" },
            record.outcome.details,
        );

        match self.generator.generate(&prompt).await {
            Ok(critique) => {
                self.memory
                    .add_insight(
                        &critique,
                        json!({
                            "type": "critique",
                            "action": record.action,
                            "success": record.outcome.success,
                        }),
                    )
                    .await;
                Some(critique)
            }
            Err(e) => {
                tracing::warn!(action = %record.action, "critique generation failed: {e}");
                None
            }
        }
    }

    /// Critique every record in the window, tolerating per-record failures.
    /// Returns how many critiques were recorded.
    pub async fn critique_window(&self, window: &[ActionRecord]) -> usize {
        let mut recorded = 0;
        for record in window {
            if self.critique_record(record).await.is_some() {
                recorded += 1;
            }
        }
        recorded
    }

    /// The most recent critique/reflection entries.
    pub async fn review_recent(&self, limit: usize) -> Vec<ReflectiveInsight> {
        let all = self.memory.all().await;
        let start = all.len().saturating_sub(limit);
        all[start..].to_vec()
    }
}
