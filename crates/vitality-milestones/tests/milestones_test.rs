use chrono::{Duration, NaiveDate, TimeZone, Utc};
use vitality_core::models::*;
use vitality_core::traits::VitalityStorage;
use vitality_milestones::*;
use vitality_storage::StorageEngine;

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 18, 0, 0).unwrap()
}

fn weaves(n: usize) -> Vec<Interaction> {
    (0..n)
        .map(|i| {
            let date = t0() - Duration::days(30 * (n - i) as i64);
            Interaction::new(InteractionAttributes::completed(date), date)
        })
        .collect()
}

fn ids(unlocks: &[BadgeUnlock]) -> Vec<&str> {
    let mut ids: Vec<&str> = unlocks.iter().map(|u| u.badge_id.as_str()).collect();
    ids.sort_unstable();
    ids
}

// ── Progressive tiers ────────────────────────────────────────────────────

#[test]
fn only_highest_reached_tier_is_selected() {
    let engine = MilestoneEngine::default();
    let rel = Relationship::new("a", "A", Tier::Close, Archetype::Sun, t0());
    let metrics = RelationshipMetrics::compute(&rel, &weaves(12), None);
    assert_eq!(metrics.weave_count, 12);

    let reached: Vec<&str> = engine
        .reached(ScopeKind::Relationship, &metrics)
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();
    assert!(reached.contains(&"weave-10"));
    assert!(!reached.contains(&"weave-5"));
    assert!(reached.contains(&"first-weave"));
    assert!(!reached.contains(&"phoenix"));
}

#[test]
fn planned_interactions_do_not_count() {
    let rel = Relationship::new("a", "A", Tier::Close, Archetype::Sun, t0());
    let planned = vec![Interaction::new(InteractionAttributes::planned(t0()), t0())];
    let metrics = RelationshipMetrics::compute(&rel, &planned, None);
    assert_eq!(metrics, RelationshipMetrics::default());
}

#[test]
fn deep_weaves_need_reflection_or_long_note() {
    let rel = Relationship::new("a", "A", Tier::Close, Archetype::Sun, t0());
    let mut reflective = InteractionAttributes::completed(t0());
    reflective.reflection = Some(StructuredReflection::default());
    let history = vec![
        Interaction::new(reflective, t0()),
        Interaction::new(InteractionAttributes::completed(t0()).with_note("x".repeat(151)), t0()),
        Interaction::new(InteractionAttributes::completed(t0()).with_note("x".repeat(150)), t0()),
    ];
    assert_eq!(RelationshipMetrics::compute(&rel, &history, None).deep_weaves, 2);
}

// ── Event badges ─────────────────────────────────────────────────────────

#[test]
fn birthday_matches_month_and_day() {
    let mut rel = Relationship::new("a", "A", Tier::Inner, Archetype::Fool, t0());
    rel.birthday = NaiveDate::from_ymd_opt(1991, 5, 17);
    let today = vec![Interaction::new(InteractionAttributes::completed(t0()), t0())];
    assert!(RelationshipMetrics::compute(&rel, &today, None).birthday_weave);

    rel.birthday = NaiveDate::from_ymd_opt(1991, 5, 18);
    assert!(!RelationshipMetrics::compute(&rel, &today, None).birthday_weave);
}

#[test]
fn phoenix_needs_a_revival_trigger() {
    let rel = Relationship::new("a", "A", Tier::Inner, Archetype::Fool, t0());
    let history = vec![Interaction::new(InteractionAttributes::completed(t0()), t0())];
    let trigger = Trigger {
        interaction: &history[0],
        revived: true,
    };
    assert!(RelationshipMetrics::compute(&rel, &history, Some(trigger)).revived);
    let quiet = Trigger {
        interaction: &history[0],
        revived: false,
    };
    assert!(!RelationshipMetrics::compute(&rel, &history, Some(quiet)).revived);
}

// ── Idempotent awarding ──────────────────────────────────────────────────

#[test]
fn award_is_idempotent_per_scope() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = MilestoneEngine::default();
    let rel = Relationship::new("a", "A", Tier::Close, Archetype::Sun, t0());
    let history = weaves(5);
    let metrics = RelationshipMetrics::compute(&rel, &history, None);
    let scope = BadgeScope::Relationship("a".into());

    let tx = storage.begin_write().unwrap();
    let first = engine.award(&*tx, &scope, &metrics, None, t0()).unwrap();
    assert_eq!(ids(&first), vec!["first-weave", "weave-5"]);
    let second = engine.award(&*tx, &scope, &metrics, None, t0()).unwrap();
    assert!(second.is_empty());

    let other = BadgeScope::Relationship("b".into());
    assert_eq!(engine.award(&*tx, &other, &metrics, None, t0()).unwrap().len(), 2);
    tx.commit().unwrap();

    let tx = storage.begin_read().unwrap();
    assert_eq!(tx.badges_for(&scope).unwrap().len(), 2);
}

// ── Global metrics ───────────────────────────────────────────────────────

fn entry(tier: Tier, archetype: Archetype, score: f64, completed: usize) -> GlobalEntry {
    GlobalEntry {
        tier,
        archetype,
        current_score: score,
        completed_interactions: completed,
    }
}

#[test]
fn thriving_circle_needs_three_inner_members_all_above_seventy() {
    let two = [
        entry(Tier::Inner, Archetype::Sun, 90.0, 1),
        entry(Tier::Inner, Archetype::Fool, 85.0, 1),
    ];
    assert!(!GlobalMetrics::compute(&two, 0, 0).thriving_inner);

    let three = [
        entry(Tier::Inner, Archetype::Sun, 90.0, 1),
        entry(Tier::Inner, Archetype::Fool, 85.0, 1),
        entry(Tier::Inner, Archetype::Hermit, 70.0, 0),
        entry(Tier::Community, Archetype::Hermit, 5.0, 0),
    ];
    let metrics = GlobalMetrics::compute(&three, 12, 6);
    assert!(metrics.thriving_inner);
    assert_eq!(metrics.active_inner, 3);
    assert_eq!(metrics.archetype_diversity, 2);

    let engine = MilestoneEngine::default();
    let reached: Vec<&str> = engine
        .reached(ScopeKind::Global, &metrics)
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(reached, vec!["total-10", "reflect-5", "inner-3", "thriving-inner"]);
}

#[test]
fn inner_member_below_seventy_breaks_the_circle() {
    let entries = [
        entry(Tier::Inner, Archetype::Sun, 90.0, 1),
        entry(Tier::Inner, Archetype::Fool, 85.0, 1),
        entry(Tier::Inner, Archetype::Hermit, 69.9, 1),
    ];
    let metrics = GlobalMetrics::compute(&entries, 0, 0);
    assert!(!metrics.thriving_inner);
    assert_eq!(metrics.active_inner, 3);
    assert_eq!(metrics.archetype_diversity, 3);
}
