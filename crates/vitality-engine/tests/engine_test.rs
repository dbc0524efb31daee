use chrono::{DateTime, Duration, TimeZone, Utc};
use vitality_core::errors::VitalityError;
use vitality_core::models::*;
use vitality_core::VitalityConfig;
use vitality_engine::{LearningTask, VitalityEngine};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()
}

fn engine() -> VitalityEngine {
    VitalityEngine::in_memory(VitalityConfig::default()).unwrap()
}

fn add(engine: &VitalityEngine, id: &str, tier: Tier, archetype: Archetype, score: f64) {
    let mut r = Relationship::new(id, format!("Friend {id}"), tier, archetype, t0());
    r.score = VitalityScore::new(score);
    engine.upsert_relationship(&r).unwrap();
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn badge_ids(unlocks: &[BadgeUnlock]) -> Vec<&str> {
    unlocks.iter().map(|u| u.badge_id.as_str()).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Fixture ──────────────────────────────────────────────────────────────

#[test]
fn fixture_log_moves_score_to_71_2() {
    let engine = engine();
    add(&engine, "ana", Tier::Community, Archetype::Emperor, 50.0);

    let attrs = InteractionAttributes::completed(t0())
        .with_category(Category::Hangout)
        .with_note("Grabbed lunch and caught up on the new apartment hunt.....");
    let logged = engine.log_interaction(&ids(&["ana"]), attrs, t0()).unwrap();

    assert_eq!(logged.updates.len(), 1);
    let update = &logged.updates[0];
    assert!(approx(update.score_before, 50.0));
    assert!(approx(update.points, 21.2), "points = {}", update.points);
    assert!(approx(update.score_after, 71.2));
    assert!(badge_ids(&logged.unlocks).contains(&"first-weave"));

    let stored = engine.relationship("ana").unwrap();
    assert!(approx(stored.score.value(), 71.2));
    assert_eq!(stored.last_updated, t0());
    assert_eq!(stored.momentum, 15.0);
    assert_eq!(stored.rated_interaction_count, 0);
}

#[test]
fn score_is_clamped_at_one_hundred() {
    let engine = engine();
    add(&engine, "ana", Tier::Inner, Archetype::Sun, 95.0);
    let attrs = InteractionAttributes::completed(t0())
        .with_category(Category::Celebration)
        .with_vibe(Vibe::FullMoon);
    let logged = engine.log_interaction(&ids(&["ana"]), attrs, t0()).unwrap();
    assert_eq!(logged.updates[0].score_after, 100.0);
}

// ── Validation and atomicity ─────────────────────────────────────────────

#[test]
fn empty_participant_list_is_rejected() {
    let engine = engine();
    let err = engine
        .log_interaction(&[], InteractionAttributes::completed(t0()), t0())
        .unwrap_err();
    assert!(matches!(err, VitalityError::ValidationError(_)));
}

#[test]
fn unknown_participant_rolls_back_everything() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Fool, 50.0);

    let err = engine
        .log_interaction(&ids(&["ana", "ghost"]), InteractionAttributes::completed(t0()), t0())
        .unwrap_err();
    assert!(matches!(err, VitalityError::RelationshipNotFound { id } if id == "ghost"));

    let tx = engine.storage().begin_read().unwrap();
    assert_eq!(tx.count_completed().unwrap(), 0);
    assert!(tx.interactions_for("ana").unwrap().is_empty());
    assert!(engine.queue().is_empty());
}

#[test]
fn duplicate_participant_ids_score_once() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Fool, 50.0);
    let logged = engine
        .log_interaction(&ids(&["ana", "ana"]), InteractionAttributes::completed(t0()), t0())
        .unwrap();
    assert_eq!(logged.updates.len(), 1);
}

// ── Planned interactions ─────────────────────────────────────────────────

#[test]
fn planned_interaction_never_mutates_relationships() {
    let engine = engine();
    add(&engine, "ana", Tier::Inner, Archetype::Magician, 40.0);
    let mut dormant = engine.relationship("ana").unwrap();
    dormant.dormant = true;
    dormant.dormant_since = Some(t0());
    engine.upsert_relationship(&dormant).unwrap();

    let later = t0() + Duration::days(2);
    let logged = engine
        .log_interaction(&ids(&["ana"]), InteractionAttributes::planned(later), later)
        .unwrap();
    assert!(logged.updates.is_empty());
    assert!(logged.unlocks.is_empty());
    assert!(engine.queue().is_empty());
    assert_eq!(engine.relationship("ana").unwrap(), dormant);

    let tx = engine.storage().begin_read().unwrap();
    assert_eq!(tx.participants_of(&logged.interaction_id).unwrap(), vec!["ana"]);
}

#[test]
fn completing_a_planned_interaction_scores_it() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Empress, 50.0);
    let planned = engine
        .log_interaction(
            &ids(&["ana"]),
            InteractionAttributes::planned(t0()).with_category(Category::MealDrink),
            t0(),
        )
        .unwrap();

    let done = engine
        .complete_planned_interaction(&planned.interaction_id, t0())
        .unwrap();
    assert_eq!(done.interaction_id, planned.interaction_id);
    assert_eq!(done.updates.len(), 1);
    assert!(done.updates[0].points > 0.0);
    assert!(!engine.queue().is_empty());

    let again = engine.complete_planned_interaction(&planned.interaction_id, t0());
    assert!(matches!(again, Err(VitalityError::ValidationError(_))));
    let missing = engine.complete_planned_interaction("nope", t0());
    assert!(matches!(missing, Err(VitalityError::InteractionNotFound { .. })));
}

// ── Dormancy and revival ─────────────────────────────────────────────────

#[test]
fn dormant_relationship_is_revived_and_earns_phoenix_once() {
    let engine = engine();
    add(&engine, "ana", Tier::Community, Archetype::Hermit, 12.0);

    let month = t0() + Duration::days(30);
    let swept = engine.sweep_dormancy(month).unwrap();
    assert_eq!(swept.len(), 1);
    let stored = engine.relationship("ana").unwrap();
    assert!(stored.dormant);
    assert_eq!(stored.dormant_since, Some(month));
    assert!(engine.sweep_dormancy(month).unwrap().is_empty());

    let first = engine
        .log_interaction(&ids(&["ana"]), InteractionAttributes::completed(month), month)
        .unwrap();
    assert!(first.updates[0].revived);
    assert!(badge_ids(&first.unlocks).contains(&"phoenix"));
    let stored = engine.relationship("ana").unwrap();
    assert!(!stored.dormant);
    assert_eq!(stored.dormant_since, None);

    let next = month + Duration::days(1);
    let second = engine
        .log_interaction(&ids(&["ana"]), InteractionAttributes::completed(next), next)
        .unwrap();
    assert!(!second.updates[0].revived);
    assert!(!badge_ids(&second.unlocks).contains(&"phoenix"));

    let phoenix = engine
        .badges(&BadgeScope::Relationship("ana".into()))
        .unwrap()
        .into_iter()
        .filter(|b| b.badge_id == "phoenix")
        .count();
    assert_eq!(phoenix, 1);
}

// ── Milestones ───────────────────────────────────────────────────────────

#[test]
fn progressive_badges_are_never_duplicated() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Sun, 50.0);

    let mut weave_five = 0;
    for day in 0..6 {
        let at = t0() + Duration::days(day);
        let logged = engine
            .log_interaction(&ids(&["ana"]), InteractionAttributes::completed(at), at)
            .unwrap();
        weave_five += badge_ids(&logged.unlocks).iter().filter(|b| **b == "weave-5").count();
    }
    assert_eq!(weave_five, 1);

    let scope = BadgeScope::Relationship("ana".into());
    assert!(engine.check_milestones(&scope, t0()).unwrap().is_empty());
    let stored = engine.badges(&scope).unwrap();
    assert_eq!(stored.iter().filter(|b| b.badge_id == "weave-5").count(), 1);
}

#[test]
fn check_milestones_reports_missing_relationship() {
    let engine = engine();
    let err = engine
        .check_milestones(&BadgeScope::Relationship("ghost".into()), t0())
        .unwrap_err();
    assert!(matches!(err, VitalityError::RelationshipNotFound { .. }));
    assert!(engine.check_milestones(&BadgeScope::Global, t0()).unwrap().is_empty());
}

#[test]
fn group_weave_counts_towards_global_totals() {
    let engine = engine();
    for id in ["a", "b", "c"] {
        add(&engine, id, Tier::Inner, Archetype::Fool, 50.0);
    }
    let mut unlocked = Vec::new();
    for day in 0..10 {
        let at = t0() + Duration::days(day);
        let logged = engine
            .log_interaction(&ids(&["a", "b", "c"]), InteractionAttributes::completed(at), at)
            .unwrap();
        unlocked.extend(logged.unlocks);
    }
    let global: Vec<&str> = unlocked
        .iter()
        .filter(|u| u.scope == BadgeScope::Global)
        .map(|u| u.badge_id.as_str())
        .collect();
    assert!(global.contains(&"total-10"));
    assert_eq!(global.iter().filter(|b| **b == "total-10").count(), 1);
}

// ── Reciprocity ──────────────────────────────────────────────────────────

#[test]
fn update_initiation_tallies_and_reports_missing() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Sun, 50.0);
    engine.update_initiation("ana", Initiator::User).unwrap();
    let summary = engine.update_initiation("ana", Initiator::Other).unwrap();
    assert_eq!((summary.user, summary.other), (1, 1));
    assert_eq!(summary.ratio, Some(0.5));

    let err = engine.update_initiation("ghost", Initiator::User).unwrap_err();
    assert!(matches!(err, VitalityError::RelationshipNotFound { .. }));
}

// ── Background learning ──────────────────────────────────────────────────

#[test]
fn learning_tasks_capture_outcomes_and_tally_initiators() {
    let engine = engine();
    add(&engine, "ana", Tier::Community, Archetype::Emperor, 50.0);
    let mut attrs = InteractionAttributes::completed(t0()).with_category(Category::Hangout);
    attrs.initiator = Some(Initiator::Other);
    engine.log_interaction(&ids(&["ana"]), attrs, t0()).unwrap();
    assert_eq!(engine.queue().len(), 3);

    let report = engine.run_learning_tasks(t0());
    assert_eq!(report.succeeded, 3);
    assert!(engine.queue().is_empty());
    assert_eq!(engine.relationship("ana").unwrap().initiation_counts.other, 1);

    let tx = engine.storage().begin_read().unwrap();
    let outcomes = tx.outcomes_for("ana").unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].category, Some(Category::Hangout));
    assert!(approx(outcomes[0].score_before, 50.0));
}

#[test]
fn outcomes_are_measured_exactly_once() {
    let engine = engine();
    add(&engine, "ana", Tier::Community, Archetype::Emperor, 50.0);
    let attrs = InteractionAttributes::completed(t0()).with_category(Category::Hangout);
    engine.log_interaction(&ids(&["ana"]), attrs, t0()).unwrap();
    engine.run_learning_tasks(t0());

    let early = engine.measure_outcomes(t0() + Duration::days(3)).unwrap();
    assert_eq!(early.measured, 0);

    let later = t0() + Duration::days(8);
    let first = engine.measure_outcomes(later).unwrap();
    assert_eq!((first.measured, first.folded), (1, 1));
    let second = engine.measure_outcomes(later).unwrap();
    assert_eq!(second.measured, 0);

    let stored = engine.relationship("ana").unwrap();
    assert_eq!(stored.outcome_count, 1);
    assert!(stored.category_effectiveness.contains_key(&Category::Hangout));
}

#[test]
fn relationship_writes_keep_history_and_pending_outcomes() {
    let engine = engine();
    add(&engine, "ana", Tier::Community, Archetype::Emperor, 50.0);
    for day in 0..3 {
        let at = t0() + Duration::days(day);
        let attrs = InteractionAttributes::completed(at).with_category(Category::Hangout);
        engine.log_interaction(&ids(&["ana"]), attrs, at).unwrap();
    }
    engine.run_learning_tasks(t0() + Duration::days(3));
    engine.update_initiation("ana", Initiator::User).unwrap();

    {
        let tx = engine.storage().begin_read().unwrap();
        assert_eq!(tx.interactions_for("ana").unwrap().len(), 3);
        assert_eq!(tx.outcomes_for("ana").unwrap().len(), 3);
    }

    let report = engine.measure_outcomes(t0() + Duration::days(12)).unwrap();
    assert_eq!((report.measured, report.skipped, report.errors), (3, 0, 0));
    assert_eq!(engine.relationship("ana").unwrap().outcome_count, 3);

    let tx = engine.storage().begin_read().unwrap();
    assert_eq!(tx.outcomes_for("ana").unwrap().len(), 3);
    assert_eq!(tx.interactions_for("ana").unwrap().len(), 3);
}

#[test]
fn weekly_cadence_is_learned_after_five_weaves() {
    let engine = engine();
    add(&engine, "ana", Tier::Close, Archetype::Hermit, 50.0);
    for week in 0..5 {
        let at = t0() + Duration::weeks(week);
        engine
            .log_interaction(&ids(&["ana"]), InteractionAttributes::completed(at), at)
            .unwrap();
    }
    engine.run_learning_tasks(t0() + Duration::weeks(5));

    let stored = engine.relationship("ana").unwrap();
    assert_eq!(stored.typical_interval_days, Some(7.0));
    assert_eq!(stored.tolerance_window_days, Some(10.5));
}

#[test]
fn failing_task_is_retried_then_recorded() {
    let engine = engine();
    engine.queue().push(LearningTask::AnalyzePattern {
        relationship_id: "ghost".into(),
    });
    let attempts = engine.queue().max_attempts();

    for _ in 1..attempts {
        let report = engine.run_learning_tasks(t0());
        assert_eq!(report.retried, 1);
    }
    let last = engine.run_learning_tasks(t0());
    assert_eq!(last.failed, 1);
    assert!(engine.queue().is_empty());

    let failures = engine.queue().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].attempts, attempts);
    assert!(failures[0].last_error.contains("analyze-pattern"));
}
