//! The self-upgrade cycle: reflect over a window of action history, critique
//! notable outcomes, then rewrite the strategy and constitution wholesale.
//!
//! Every stage degrades gracefully. A failing generator or persistence sink
//! must leave the previous governance documents in place and never abort the
//! cycle; partial failures are logged and reported, not propagated.

use crate::constitution::ConstitutionRewriter;
use crate::critic::SelfCritic;
use crate::memory::ReflectiveMemory;
use crate::reflector::SelfReflector;
use crate::strategy::StrategyRewriter;
use std::sync::Arc;
use thymos_core::{ActionRecord, GovernanceStore, PersistenceSink, TextGenerator};

/// What an upgrade cycle actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpgradeReport {
    /// Records considered in this cycle.
    pub window_len: usize,
    /// Individual critiques produced.
    pub critiques: usize,
    pub strategy_replaced: bool,
    pub principles_replaced: bool,
}

pub struct UpgradeEngine {
    reflector: SelfReflector,
    critic: SelfCritic,
    strategy_rewriter: StrategyRewriter,
    constitution_rewriter: ConstitutionRewriter,
    governance: Arc<GovernanceStore>,
    sink: Arc<dyn PersistenceSink>,
}

impl UpgradeEngine {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        memory: Arc<ReflectiveMemory>,
        governance: Arc<GovernanceStore>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Self {
        Self {
            reflector: SelfReflector::new(memory.clone()),
            critic: SelfCritic::new(generator.clone(), memory.clone()),
            strategy_rewriter: StrategyRewriter::new(generator.clone(), memory.clone()),
            constitution_rewriter: ConstitutionRewriter::new(generator, memory),
            governance,
            sink,
        }
    }

    /// Run one full upgrade cycle over a window of action history.
    ///
    /// `affective_snapshot` is persisted alongside the governance documents
    /// as telemetry for later inspection.
    pub async fn run_cycle(
        &self,
        window: &[ActionRecord],
        affective_snapshot: serde_json::Value,
    ) -> UpgradeReport {
        let mut report = UpgradeReport {
            window_len: window.len(),
            ..Default::default()
        };

        self.reflector.reflect(window).await;
        report.critiques = self.critic.critique_window(window).await;

        let current_strategy = self.governance.strategy();
        let revised_strategy = self.strategy_rewriter.rewrite(&current_strategy).await;
        if revised_strategy != *current_strategy {
            if let Err(e) = self.sink.persist_strategy(&revised_strategy).await {
                tracing::warn!("failed to persist revised strategy: {e}");
            }
            self.governance.replace_strategy(revised_strategy);
            report.strategy_replaced = true;
        }

        let current_principles = self.governance.principles();
        let revised_principles = self
            .constitution_rewriter
            .rewrite(&current_principles)
            .await;
        if revised_principles != *current_principles {
            if let Err(e) = self.sink.persist_principles(&revised_principles).await {
                tracing::warn!("failed to persist revised principles: {e}");
            }
            self.governance.replace_principles(revised_principles);
            report.principles_replaced = true;
        }

        if let Err(e) = self.sink.persist_snapshot(affective_snapshot).await {
            tracing::warn!("failed to persist affective snapshot: {e}");
        }

        tracing::info!(
            window = report.window_len,
            critiques = report.critiques,
            strategy_replaced = report.strategy_replaced,
            principles_replaced = report.principles_replaced,
            "upgrade cycle complete"
        );
        report
    }
}
