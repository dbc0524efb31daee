use chrono::{DateTime, Duration, Utc};
use vitality_core::config::PatternConfig;
use vitality_core::models::*;
use vitality_decay::DecayModel;
use vitality_learning::*;

fn relationship(tier: Tier) -> Relationship {
    Relationship::new("rel-1", "Test Friend", tier, Archetype::Sun, Utc::now())
}

fn interactions_every(start: DateTime<Utc>, gaps_days: &[i64]) -> Vec<Interaction> {
    let mut date = start;
    let mut out = vec![Interaction::new(InteractionAttributes::completed(date), start)];
    for gap in gaps_days {
        date += Duration::days(*gap);
        out.push(Interaction::new(InteractionAttributes::completed(date), start));
    }
    out
}

// ── Pattern learning ─────────────────────────────────────────────────────

#[test]
fn pattern_requires_minimum_completed_interactions() {
    let learner = PatternLearner::default();
    let four = interactions_every(Utc::now(), &[7, 7, 7]);
    assert!(learner.analyze(&four).is_none());

    let mut five = four.clone();
    five.push(Interaction::new(
        InteractionAttributes::planned(Utc::now() + Duration::days(40)),
        Utc::now(),
    ));
    assert!(learner.analyze(&five).is_none(), "planned interactions do not count");
}

#[test]
fn regular_weekly_cadence_is_reliable() {
    let learner = PatternLearner::default();
    let history = interactions_every(Utc::now() - Duration::days(60), &[7, 7, 7, 7, 7]);
    let mut rel = relationship(Tier::Inner);

    let analysis = learner.learn(&mut rel, &history).unwrap();
    assert!(analysis.reliable);
    assert_eq!(analysis.gap_count, 5);
    assert!((analysis.average_interval_days - 7.0).abs() < 1e-9);
    assert_eq!(analysis.coefficient_of_variation, 0.0);
    assert_eq!(rel.typical_interval_days, Some(7.0));
    assert_eq!(rel.tolerance_window_days, Some(10.5));
}

#[test]
fn out_of_order_history_is_sorted_first() {
    let learner = PatternLearner::default();
    let mut history = interactions_every(Utc::now() - Duration::days(60), &[7, 7, 7, 7]);
    history.reverse();
    let analysis = learner.analyze(&history).unwrap();
    assert!((analysis.average_interval_days - 7.0).abs() < 1e-9);
}

#[test]
fn slow_cadence_widens_window_beyond_tier_default() {
    let learner = PatternLearner::default();
    let decay = DecayModel::default();
    let history = interactions_every(Utc::now() - Duration::days(200), &[30, 28, 32, 30]);
    let mut rel = relationship(Tier::Community);
    let default_window = decay.tolerance_days(&rel);

    learner.learn(&mut rel, &history).unwrap();
    assert!(decay.tolerance_days(&rel) > default_window);
}

#[test]
fn erratic_cadence_is_not_applied() {
    let learner = PatternLearner::default();
    let history = interactions_every(Utc::now() - Duration::days(200), &[1, 60, 2, 45, 1]);
    let mut rel = relationship(Tier::Close);
    rel.tolerance_window_days = Some(12.0);

    let analysis = learner.learn(&mut rel, &history).unwrap();
    assert!(!analysis.reliable);
    assert!(analysis.tolerance_window_days.is_none());
    assert_eq!(rel.tolerance_window_days, Some(12.0), "previous value kept");
}

#[test]
fn tolerance_window_is_clamped() {
    let learner = PatternLearner::new(PatternConfig {
        max_tolerance_days: 20.0,
        ..PatternConfig::default()
    });
    let history = interactions_every(Utc::now() - Duration::days(400), &[60, 60, 60, 60]);
    let analysis = learner.analyze(&history).unwrap();
    assert_eq!(analysis.tolerance_window_days, Some(20.0));
}

// ── Effectiveness learning ──────────────────────────────────────────────

fn scored_relationship(score: f64, at: DateTime<Utc>) -> Relationship {
    let mut rel = Relationship::new("rel-1", "Test Friend", Tier::Close, Archetype::Sun, at);
    rel.score = VitalityScore::new(score);
    rel.last_updated = at;
    rel
}

#[test]
fn untouched_relationship_measures_as_predicted() {
    let learner = EffectivenessLearner::default();
    let t0 = Utc::now() - Duration::days(8);
    let rel = scored_relationship(50.0, t0);
    let outcome = InteractionOutcome::capture("rel-1", "i-1", Some(Category::Hangout), 40.0, 10.0, t0);

    let now = t0 + Duration::days(7);
    assert!(learner.is_mature(&outcome, now));
    let m = learner.measure(&rel, &outcome, now);
    assert!((m.actual_impact - 10.0).abs() < 1e-9);
    assert!((m.sample_ratio.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn outperforming_interaction_raises_ratio_by_ema() {
    let learner = EffectivenessLearner::default();
    let t0 = Utc::now() - Duration::days(8);
    let mut rel = scored_relationship(55.0, t0);
    let outcome = InteractionOutcome::capture("rel-1", "i-1", Some(Category::Hangout), 40.0, 10.0, t0);

    let m = learner.learn(&mut rel, &outcome, t0 + Duration::days(7));
    assert!((m.sample_ratio.unwrap() - 1.5).abs() < 1e-9);
    assert!((rel.learned_ratio(Category::Hangout) - 1.15).abs() < 1e-9);
    assert_eq!(rel.outcome_count, 1);
}

#[test]
fn learned_ratio_is_clamped() {
    let learner = EffectivenessLearner::default();
    let mut rel = relationship(Tier::Close);
    for _ in 0..50 {
        learner.fold(&mut rel, Category::DeepTalk, 3.0);
    }
    assert_eq!(rel.learned_ratio(Category::DeepTalk), 1.5);
    assert_eq!(rel.outcome_count, 50);
}

#[test]
fn unusable_outcomes_do_not_count() {
    let learner = EffectivenessLearner::default();
    let t0 = Utc::now() - Duration::days(10);
    let mut rel = scored_relationship(50.0, t0);

    let no_category = InteractionOutcome::capture("rel-1", "i-1", None, 40.0, 10.0, t0);
    let m = learner.learn(&mut rel, &no_category, Utc::now());
    assert!(m.sample_ratio.is_none());

    let no_impact = InteractionOutcome::capture("rel-1", "i-2", Some(Category::TextCall), 100.0, 0.0, t0);
    assert!(learner.learn(&mut rel, &no_impact, Utc::now()).sample_ratio.is_none());

    assert_eq!(rel.outcome_count, 0);
    assert!(rel.category_effectiveness.is_empty());
}

#[test]
fn immature_outcomes_are_not_ready() {
    let learner = EffectivenessLearner::default();
    let now = Utc::now();
    let outcome = InteractionOutcome::capture("rel-1", "i-1", Some(Category::Hangout), 40.0, 10.0, now - Duration::days(2));
    assert!(!learner.is_mature(&outcome, now));
}

// ── Reciprocity ──────────────────────────────────────────────────────────

#[test]
fn reciprocity_tallies_initiations() {
    let tracker = ReciprocityTracker::default();
    let mut rel = relationship(Tier::Close);
    for _ in 0..3 {
        tracker.record(&mut rel, Initiator::User);
    }
    tracker.record(&mut rel, Initiator::Other);

    let summary = tracker.summary(&rel);
    assert_eq!(summary.user, 3);
    assert_eq!(summary.other, 1);
    assert_eq!(summary.ratio, Some(0.75));
    assert_eq!(summary.balance, ReciprocityBalance::UserLeading);
}
