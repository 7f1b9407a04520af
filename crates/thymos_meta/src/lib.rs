//! # Thymos Meta-Governance
//!
//! The longer-period self-improvement cycle: reflect on the action/outcome
//! window, critique individual decisions, and propose wholesale revisions to
//! the strategy and the constitution.
//!
//! Every step that depends on the text-generation collaborator is
//! best-effort: a failure or malformed response degrades that step to
//! "no change" and the remaining steps still run. Nothing in this crate can
//! crash the agent.

mod constitution;
mod critic;
mod generator;
mod memory;
mod reflector;
mod strategy;
mod upgrade;

pub use constitution::ConstitutionRewriter;
pub use critic::SelfCritic;
pub use generator::MockGenerator;
pub use memory::{ReflectiveInsight, ReflectiveMemory};
pub use reflector::SelfReflector;
pub use strategy::{parse_strategy, StrategyRewriter};
pub use upgrade::{UpgradeEngine, UpgradeReport};
