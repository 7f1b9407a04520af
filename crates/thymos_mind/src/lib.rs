//! # Thymos Mind
//!
//! Cognitive control and the top-level consciousness loop.
//!
//! The [`TaskArbiter`] picks one task per tick from the current plan,
//! consulting the emotion engine: under high frustration it diversifies away
//! from the most recently selected action instead of retrying the same
//! failing action type. The [`ConsciousnessLoop`] drives the
//! sense → select → execute → reflect cycle from a heartbeat, dispatches
//! work through the [`ExecutorRegistry`], feeds outcomes back into the
//! emotion engine, and emits an upgrade request every N ticks.

mod arbiter;
mod conscious;
mod history;
mod registry;

pub use arbiter::TaskArbiter;
pub use conscious::{outcome_impact, ConsciousnessLoop, MindEvent, TickPhase};
pub use history::HistoryLog;
pub use registry::ExecutorRegistry;
