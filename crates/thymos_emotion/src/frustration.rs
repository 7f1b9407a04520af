//! Frustration tracking: a scalar that accumulates on failed actions and
//! decays by a fixed amount per cycle.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DECAY_RATE: f32 = 0.1;
pub const DEFAULT_THRESHOLD: f32 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrustrationTracker {
    level: f32,
    decay_rate: f32,
    threshold: f32,
}

impl Default for FrustrationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_RATE, DEFAULT_THRESHOLD)
    }
}

impl FrustrationTracker {
    pub fn new(decay_rate: f32, threshold: f32) -> Self {
        Self {
            level: 0.0,
            decay_rate: decay_rate.clamp(0.0, 1.0),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Increase frustration by `amount`, capped at 1.0. Negative or
    /// non-finite amounts are ignored.
    pub fn increase(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.level = (self.level + amount).min(1.0);
    }

    /// Decay frustration by the fixed rate, floored at 0.0.
    pub fn decay(&mut self) {
        self.level = (self.level - self.decay_rate).max(0.0);
    }

    /// Pure threshold check: true iff level has reached the threshold.
    pub fn is_high(&self) -> bool {
        self.level >= self.threshold
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_caps_at_one() {
        let mut tracker = FrustrationTracker::default();
        tracker.increase(0.8);
        tracker.increase(0.8);
        assert_eq!(tracker.level(), 1.0);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let mut tracker = FrustrationTracker::default();
        tracker.increase(0.15);
        tracker.decay();
        tracker.decay();
        assert_eq!(tracker.level(), 0.0);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut tracker = FrustrationTracker::new(0.1, 0.7);
        tracker.increase(0.69);
        assert!(!tracker.is_high());
        tracker.increase(0.01);
        assert!(tracker.is_high());
    }

    #[test]
    fn test_negative_increase_ignored() {
        let mut tracker = FrustrationTracker::default();
        tracker.increase(0.5);
        tracker.increase(-0.3);
        assert!((tracker.level() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut tracker = FrustrationTracker::default();
        tracker.increase(0.9);
        tracker.reset();
        assert_eq!(tracker.level(), 0.0);
        assert!(!tracker.is_high());
    }
}
