//! Stable personality coefficients.
//!
//! Traits scale how events affect affective state (optimism scales mood
//! impacts, openness scales mood decay). They are never mutated by ordinary
//! ticks; only an explicit administrative `set` changes them.

use serde::{Deserialize, Serialize};
use thymos_core::config::TraitsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    Curiosity,
    Assertiveness,
    Openness,
    Empathy,
    Optimism,
    Sensitivity,
    Resilience,
}

/// Named trait scalars, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub curiosity: f32,
    pub assertiveness: f32,
    pub openness: f32,
    pub empathy: f32,
    pub optimism: f32,
    pub sensitivity: f32,
    pub resilience: f32,
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self {
            curiosity: 0.5,
            assertiveness: 0.5,
            openness: 0.5,
            empathy: 0.5,
            optimism: 0.5,
            sensitivity: 0.5,
            resilience: 0.5,
        }
    }
}

impl TraitProfile {
    pub fn from_config(cfg: &TraitsConfig) -> Self {
        let mut profile = Self {
            curiosity: cfg.curiosity,
            assertiveness: cfg.assertiveness,
            openness: cfg.openness,
            empathy: cfg.empathy,
            optimism: cfg.optimism,
            sensitivity: cfg.sensitivity,
            resilience: cfg.resilience,
        };
        profile.normalize();
        profile
    }

    pub fn get(&self, kind: TraitKind) -> f32 {
        match kind {
            TraitKind::Curiosity => self.curiosity,
            TraitKind::Assertiveness => self.assertiveness,
            TraitKind::Openness => self.openness,
            TraitKind::Empathy => self.empathy,
            TraitKind::Optimism => self.optimism,
            TraitKind::Sensitivity => self.sensitivity,
            TraitKind::Resilience => self.resilience,
        }
    }

    /// Administrative update, clamped to [0, 1].
    pub fn set(&mut self, kind: TraitKind, value: f32) {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.5 };
        match kind {
            TraitKind::Curiosity => self.curiosity = value,
            TraitKind::Assertiveness => self.assertiveness = value,
            TraitKind::Openness => self.openness = value,
            TraitKind::Empathy => self.empathy = value,
            TraitKind::Optimism => self.optimism = value,
            TraitKind::Sensitivity => self.sensitivity = value,
            TraitKind::Resilience => self.resilience = value,
        }
    }

    fn normalize(&mut self) {
        for kind in [
            TraitKind::Curiosity,
            TraitKind::Assertiveness,
            TraitKind::Openness,
            TraitKind::Empathy,
            TraitKind::Optimism,
            TraitKind::Sensitivity,
            TraitKind::Resilience,
        ] {
            self.set(kind, self.get(kind));
        }
    }
}
