//! # Thymos Emotion Engine
//!
//! The affective subsystem of the agent: bounded emotional dimensions,
//! stable personality traits that scale how events land, a frustration
//! accumulator with a threshold signal, and trait-weighted mood modulation
//! with time-based decay.
//!
//! Everything here is a plain synchronous state machine. The consciousness
//! loop owns the engine behind a lock and hands read-only snapshots to the
//! task arbiter, so no consumer ever observes a partially-updated state.
//!
//! ## Invariants
//!
//! - Mood stays in [-1, 1]; frustration and energy stay in [0, 1], for any
//!   sequence of events. Out-of-range and non-finite inputs self-clamp,
//!   never panic.
//! - Traits are immutable during ordinary ticks; only explicit
//!   administrative updates change them.

mod engine;
mod frustration;
mod modulation;
mod state;
mod traits;

pub use engine::{EmotionEngine, EmotionSnapshot};
pub use frustration::FrustrationTracker;
pub use modulation::MoodModulator;
pub use state::{AffectiveState, Dimension, EventImpact};
pub use traits::{TraitKind, TraitProfile};
