//! Affective state: the agent's current mood, frustration and energy.
//!
//! All mutation goes through additive, clamped updates. There is no way to
//! push a dimension out of its documented range.

use serde::{Deserialize, Serialize};

/// Guard against NaN and Infinity in state values.
/// If the value is not finite, replace with the provided fallback.
#[inline]
fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in affective state, resetting to {}", fallback);
        fallback
    }
}

/// The closed set of affective dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Overall positive/negative tone, in [-1, 1].
    Mood,
    /// Accumulated signal of repeated negative outcomes, in [0, 1].
    Frustration,
    /// Vitality available for work, in [0, 1].
    Energy,
}

impl Dimension {
    /// Valid range for this dimension.
    pub fn range(&self) -> (f32, f32) {
        match self {
            Dimension::Mood => (-1.0, 1.0),
            Dimension::Frustration | Dimension::Energy => (0.0, 1.0),
        }
    }
}

/// An event's emotional impact: a delta per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    pub mood: f32,
    pub frustration: f32,
    pub energy: f32,
}

impl EventImpact {
    pub fn mood(delta: f32) -> Self {
        Self {
            mood: delta,
            ..Default::default()
        }
    }

    pub fn with_energy(mut self, delta: f32) -> Self {
        self.energy = delta;
        self
    }

    pub fn with_frustration(mut self, delta: f32) -> Self {
        self.frustration = delta;
        self
    }
}

/// Current affective dimensions, bounded and self-clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffectiveState {
    mood: f32,
    frustration: f32,
    energy: f32,
}

impl Default for AffectiveState {
    fn default() -> Self {
        Self {
            mood: 0.0,
            frustration: 0.0,
            energy: 1.0,
        }
    }
}

impl AffectiveState {
    pub fn new(mood: f32, frustration: f32, energy: f32) -> Self {
        let mut state = Self {
            mood,
            frustration,
            energy,
        };
        state.normalize();
        state
    }

    /// Apply additive changes to the affective dimensions, clamping each
    /// result to its valid range.
    pub fn apply(&mut self, changes: &EventImpact) {
        self.mood += sanitize_f32(changes.mood, 0.0);
        self.frustration += sanitize_f32(changes.frustration, 0.0);
        self.energy += sanitize_f32(changes.energy, 0.0);
        self.normalize();
    }

    pub fn get(&self, dim: Dimension) -> f32 {
        match dim {
            Dimension::Mood => self.mood,
            Dimension::Frustration => self.frustration,
            Dimension::Energy => self.energy,
        }
    }

    pub fn mood(&self) -> f32 {
        self.mood
    }

    pub fn frustration(&self) -> f32 {
        self.frustration
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Clamp all dimensions to their valid ranges.
    fn normalize(&mut self) {
        self.mood = sanitize_f32(self.mood, 0.0).clamp(-1.0, 1.0);
        self.frustration = sanitize_f32(self.frustration, 0.0).clamp(0.0, 1.0);
        self.energy = sanitize_f32(self.energy, 1.0).clamp(0.0, 1.0);
    }
}
