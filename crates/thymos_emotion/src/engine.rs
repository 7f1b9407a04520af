//! The Emotion Engine: composes affective state, traits, frustration
//! tracking and mood modulation into the single affective subsystem consumed
//! by task arbitration.

use crate::frustration::FrustrationTracker;
use crate::modulation::MoodModulator;
use crate::state::{AffectiveState, EventImpact};
use crate::traits::{TraitKind, TraitProfile};
use serde::{Deserialize, Serialize};
use thymos_core::config::EmotionConfig;

/// Fraction of a negative mood delta converted into frustration.
const FRUSTRATION_GAIN: f32 = 0.5;

pub struct EmotionEngine {
    state: AffectiveState,
    traits: TraitProfile,
    tracker: FrustrationTracker,
    modulator: MoodModulator,
}

impl Default for EmotionEngine {
    fn default() -> Self {
        Self::new(TraitProfile::default(), FrustrationTracker::default())
    }
}

impl EmotionEngine {
    pub fn new(traits: TraitProfile, tracker: FrustrationTracker) -> Self {
        Self {
            state: AffectiveState::default(),
            traits,
            tracker,
            modulator: MoodModulator,
        }
    }

    pub fn from_config(cfg: &EmotionConfig) -> Self {
        Self::new(
            TraitProfile::from_config(&cfg.traits),
            FrustrationTracker::new(cfg.frustration_decay_rate, cfg.frustration_threshold),
        )
    }

    /// Apply an external event to the affective state.
    ///
    /// Deltas are trait-weighted and clamped by the modulator. A negative raw
    /// mood delta additionally feeds frustration by half its magnitude.
    pub fn apply_event(&mut self, impact: &EventImpact) {
        self.modulator.apply_event(&mut self.state, &self.traits, impact);
        if impact.mood < 0.0 {
            self.tracker.increase(impact.mood.abs() * FRUSTRATION_GAIN);
        }
        tracing::trace!(
            mood = self.state.mood(),
            frustration = self.tracker.level(),
            "applied event impact"
        );
    }

    /// One decay cycle: mood drifts toward neutral, frustration drops by the
    /// tracker's fixed rate. Called exactly once per tick.
    pub fn decay(&mut self) {
        self.modulator.decay_mood(&mut self.state, &self.traits);
        self.tracker.decay();
    }

    /// True iff accumulated frustration has reached the threshold.
    pub fn is_frustrated(&self) -> bool {
        self.tracker.is_high()
    }

    /// Defensive copy of all affective dimensions, trait values and
    /// frustration. Callers cannot mutate engine state through the result.
    pub fn snapshot(&self) -> EmotionSnapshot {
        EmotionSnapshot {
            mood: self.state.mood(),
            energy: self.state.energy(),
            frustration: self.tracker.level(),
            frustration_threshold: self.tracker.threshold(),
            traits: self.traits,
        }
    }

    /// Administrative trait update; never called from ordinary ticks.
    pub fn set_trait(&mut self, kind: TraitKind, value: f32) {
        self.traits.set(kind, value);
    }

    pub fn reset_frustration(&mut self) {
        self.tracker.reset();
    }
}

/// Owned, consistent copy of the engine's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSnapshot {
    pub mood: f32,
    pub energy: f32,
    pub frustration: f32,
    pub frustration_threshold: f32,
    pub traits: TraitProfile,
}

impl EmotionSnapshot {
    pub fn is_frustrated(&self) -> bool {
        self.frustration >= self.frustration_threshold
    }
}
