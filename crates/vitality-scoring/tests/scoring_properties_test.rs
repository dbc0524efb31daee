use chrono::Utc;
use proptest::prelude::*;
use vitality_core::config::ScoringConfig;
use vitality_core::models::*;
use vitality_scoring::formula::quality_multiplier;
use vitality_scoring::tables::group_dilution;
use vitality_scoring::ScoringModel;

fn arb_vibe() -> impl Strategy<Value = Option<Vibe>> {
    proptest::option::of(prop_oneof![
        Just(Vibe::NewMoon),
        Just(Vibe::WaxingCrescent),
        Just(Vibe::FirstQuarter),
        Just(Vibe::WaxingGibbous),
        Just(Vibe::FullMoon),
    ])
}

fn arb_duration() -> impl Strategy<Value = Option<InteractionDuration>> {
    proptest::option::of(prop_oneof![
        Just(InteractionDuration::Quick),
        Just(InteractionDuration::Standard),
        Just(InteractionDuration::Extended),
    ])
}

proptest! {
    #[test]
    fn quality_multiplier_within_band(overall in 1u8..=5) {
        let m = quality_multiplier(overall, &ScoringConfig::default());
        prop_assert!((0.7..=1.3).contains(&m));
    }

    #[test]
    fn dilution_non_increasing(a in 0u32..50, b in 0u32..50) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(group_dilution(large) <= group_dilution(small));
    }

    #[test]
    fn quality_levels_stay_in_range(
        vibe in arb_vibe(),
        duration in arb_duration(),
        note_len in 0usize..400,
        reflected in any::<bool>(),
    ) {
        let model = ScoringModel::default();
        let mut attrs = InteractionAttributes::completed(Utc::now()).with_note("n".repeat(note_len));
        attrs.vibe = vibe;
        attrs.duration = duration;
        if reflected {
            attrs.reflection = Some(StructuredReflection::default());
        }
        let q = model.assess_quality(&attrs);
        prop_assert!((1..=5).contains(&q.depth));
        prop_assert!((1..=5).contains(&q.energy));
        prop_assert!((1..=5).contains(&q.overall));
    }

    #[test]
    fn points_are_positive_and_finite(
        vibe in arb_vibe(),
        group in 0u32..20,
        outcomes in 0u32..30,
        ratio in 0.5f64..1.5,
    ) {
        let model = ScoringModel::default();
        let now = Utc::now();
        let mut r = Relationship::new("p", "P", Tier::Close, Archetype::Fool, now);
        r.outcome_count = outcomes;
        r.category_effectiveness.insert(Category::Hangout, ratio);
        let mut attrs = InteractionAttributes::completed(now)
            .with_category(Category::Hangout)
            .with_group_size(group);
        attrs.vibe = vibe;
        let points = model.points_for_interaction(&r, &attrs, now);
        prop_assert!(points.is_finite());
        prop_assert!(points > 0.0);
    }
}
