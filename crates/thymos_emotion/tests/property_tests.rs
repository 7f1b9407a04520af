//! Property-based tests for the emotion engine.
//!
//! Uses proptest to verify invariants that must hold for ALL possible input
//! sequences, not just hand-picked examples: dimension clamping, frustration
//! monotonicity under decay, and exact convergence to zero.

use proptest::prelude::*;
use thymos_emotion::{EmotionEngine, EventImpact, FrustrationTracker, TraitProfile};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary event impact, deliberately allowed to exceed valid ranges so we
/// exercise the self-clamping path.
fn arb_impact() -> impl Strategy<Value = EventImpact> {
    (-3.0f32..=3.0, -3.0f32..=3.0, -3.0f32..=3.0).prop_map(|(mood, frustration, energy)| {
        EventImpact {
            mood,
            frustration,
            energy,
        }
    })
}

fn arb_traits() -> impl Strategy<Value = TraitProfile> {
    (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(optimism, openness)| TraitProfile {
        optimism,
        openness,
        ..TraitProfile::default()
    })
}

// ============================================================================
// Clamping
// ============================================================================

proptest! {
    /// **Core invariant**: for any sequence of apply_event calls interleaved
    /// with decay, mood stays in [-1, 1] and frustration/energy in [0, 1].
    #[test]
    fn engine_dimensions_always_in_range(
        traits in arb_traits(),
        impacts in prop::collection::vec(arb_impact(), 0..40),
        decay_mask in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut engine = EmotionEngine::new(traits, FrustrationTracker::default());

        for (i, impact) in impacts.iter().enumerate() {
            engine.apply_event(impact);
            if decay_mask.get(i).copied().unwrap_or(false) {
                engine.decay();
            }

            let snap = engine.snapshot();
            prop_assert!((-1.0..=1.0).contains(&snap.mood));
            prop_assert!((0.0..=1.0).contains(&snap.frustration));
            prop_assert!((0.0..=1.0).contains(&snap.energy));
            prop_assert!(snap.mood.is_finite());
        }
    }

    /// Non-finite deltas never corrupt the state.
    #[test]
    fn engine_survives_non_finite_input(mood in prop::sample::select(
        vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY]
    )) {
        let mut engine = EmotionEngine::default();
        engine.apply_event(&EventImpact::mood(mood).with_energy(mood));
        let snap = engine.snapshot();
        prop_assert!(snap.mood.is_finite());
        prop_assert!(snap.energy.is_finite());
    }
}

// ============================================================================
// Frustration decay
// ============================================================================

proptest! {
    /// Repeated decay with no intervening events never increases frustration.
    #[test]
    fn decay_is_monotone_nonincreasing(
        initial in 0.0f32..=1.0,
        steps in 1usize..30,
    ) {
        let mut tracker = FrustrationTracker::default();
        tracker.increase(initial);

        let mut prev = tracker.level();
        for _ in 0..steps {
            tracker.decay();
            prop_assert!(tracker.level() <= prev);
            prev = tracker.level();
        }
    }

    /// Frustration reaches exactly 0 after at most ceil(initial/decay_rate)
    /// decay calls.
    #[test]
    fn decay_reaches_zero_in_bounded_steps(initial in 0.0f32..=1.0) {
        let rate = 0.1f32;
        let mut tracker = FrustrationTracker::new(rate, 0.7);
        tracker.increase(initial);

        let bound = (tracker.level() / rate).ceil() as usize;
        for _ in 0..bound {
            tracker.decay();
        }
        prop_assert_eq!(tracker.level(), 0.0);
    }
}
