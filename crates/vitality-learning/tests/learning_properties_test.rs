use chrono::{Duration, Utc};
use proptest::prelude::*;
use vitality_core::models::*;
use vitality_learning::*;

fn arb_category() -> impl Strategy<Value = Category> {
    (0usize..Category::ALL.len()).prop_map(|i| Category::ALL[i])
}

proptest! {
    #[test]
    fn learned_ratio_stays_clamped(
        category in arb_category(),
        samples in proptest::collection::vec(0.0f64..=3.0, 1..40),
    ) {
        let learner = EffectivenessLearner::default();
        let mut rel = Relationship::new("p", "P", Tier::Close, Archetype::Hermit, Utc::now());
        for sample in &samples {
            learner.fold(&mut rel, category, *sample);
            let ratio = rel.learned_ratio(category);
            prop_assert!((0.5..=1.5).contains(&ratio));
        }
        prop_assert_eq!(rel.outcome_count, samples.len() as u32);
    }

    #[test]
    fn reciprocity_ratio_is_a_fraction(user in 0u32..500, other in 0u32..500) {
        let counts = InitiationCounts { user, other };
        match ReciprocityTracker::ratio(&counts) {
            Some(r) => prop_assert!((0.0..=1.0).contains(&r)),
            None => prop_assert_eq!(user + other, 0),
        }
        let balance = ReciprocityTracker::default().balance(&counts);
        prop_assert_eq!(
            balance == ReciprocityBalance::InsufficientData,
            user + other < 4
        );
    }

    #[test]
    fn steady_cadence_window_within_bounds(gap in 1i64..120, extra in 0usize..6) {
        let start = Utc::now() - Duration::days(1_000);
        let history: Vec<Interaction> = (0..(5 + extra) as i64)
            .map(|k| {
                Interaction::new(
                    InteractionAttributes::completed(start + Duration::days(gap * k)),
                    start,
                )
            })
            .collect();

        let analysis = PatternLearner::default().analyze(&history).unwrap();
        prop_assert!(analysis.reliable);
        let window = analysis.tolerance_window_days.unwrap();
        prop_assert!((2.0..=60.0).contains(&window));
    }
}
