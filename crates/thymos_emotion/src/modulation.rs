//! Mood modulation: trait-weighted event impacts and time-based decay.
//!
//! Operates on state borrowed from the engine rather than owning it, so
//! there is exactly one owner of the affective state.

use crate::state::{AffectiveState, EventImpact};
use crate::traits::{TraitKind, TraitProfile};

/// Fraction of the distance to neutral that mood loses per decay cycle,
/// before scaling by openness.
const MOOD_DECAY_BASE: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct MoodModulator;

impl MoodModulator {
    /// Apply an external event's emotional impact, scaling each delta by a
    /// trait weight: mood deltas by optimism, everything else by 1.0.
    pub fn apply_event(
        &self,
        state: &mut AffectiveState,
        traits: &TraitProfile,
        impact: &EventImpact,
    ) {
        let weighted = EventImpact {
            mood: impact.mood * traits.get(TraitKind::Optimism),
            frustration: impact.frustration,
            energy: impact.energy,
        };
        state.apply(&weighted);
    }

    /// Pull mood toward neutral by `MOOD_DECAY_BASE × openness` of the
    /// remaining distance (exponential decay toward 0).
    pub fn decay_mood(&self, state: &mut AffectiveState, traits: &TraitProfile) {
        let current = state.mood();
        let openness = traits.get(TraitKind::Openness);
        let delta = (0.0 - current) * (MOOD_DECAY_BASE * openness);
        state.apply(&EventImpact::mood(delta));
    }
}
