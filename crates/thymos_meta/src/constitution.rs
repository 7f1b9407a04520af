//! Constitution rewriting: regenerate the full set of guiding principles
//! from accumulated insights. Replacement is always wholesale — either a
//! complete new constitution is adopted, or the current one is retained.

use crate::memory::ReflectiveMemory;
use std::sync::Arc;
use thymos_core::{Constitution, TextGenerator};

pub struct ConstitutionRewriter {
    generator: Arc<dyn TextGenerator>,
    memory: Arc<ReflectiveMemory>,
}

impl ConstitutionRewriter {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: Arc<ReflectiveMemory>) -> Self {
        Self { generator, memory }
    }

    /// Produce a candidate replacement constitution.
    ///
    /// Returns the current constitution unchanged when generation fails or
    /// when the generated text yields no principles at all. A partial merge
    /// is never performed.
    pub async fn rewrite(&self, current: &Constitution) -> Constitution {
        let insights = self.memory.all().await;
        let insight_lines: Vec<String> = insights
            .iter()
            .map(|i| format!("- {}", i.text))
            .collect();

        let prompt = format!(
            "Review these guiding principles in light of recent insights and \
             rewrite them as a complete, improved set.\n\n\
             Current principles:\n{}\n\n\
             Insights:\n{}\n\n\
             Respond with one principle per line. Lines starting with '#' are ignored.",
            current.to_text(),
            insight_lines.join("\n"),
        );

        match self.generator.generate(&prompt).await {
            Ok(response) => {
                let candidate = Constitution::from_text(&response);
                if candidate.is_empty() {
                    tracing::warn!("constitution rewrite produced no principles, keeping current");
                    current.clone()
                } else {
                    candidate
                }
            }
            Err(e) => {
                tracing::warn!("constitution rewrite generation failed, keeping current: {e}");
                current.clone()
            }
        }
    }
}
