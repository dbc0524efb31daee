//! Metric snapshots the evaluator reads. Relationship metrics are derived
//! from interaction history plus the triggering interaction; global metrics
//! from account-wide aggregates.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use vitality_core::models::{Archetype, Interaction, Relationship, Tier, Vibe};

use crate::catalog::BadgeCategory;

/// Inner-tier score counted towards `active-inner-circle`.
pub const ACTIVE_INNER_SCORE: f64 = 60.0;
/// Inner-tier score every member must hold for `thriving-inner-circle`.
pub const THRIVING_INNER_SCORE: f64 = 70.0;
/// Inner-tier members needed before the circle can be called thriving.
pub const THRIVING_INNER_MIN_MEMBERS: usize = 3;

/// Anything the evaluator can read a category value from. `None` means the
/// category is not measured by this source.
pub trait MetricSource {
    fn metric(&self, category: BadgeCategory) -> Option<u32>;
}

/// State of the interaction that triggered an evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Trigger<'a> {
    pub interaction: &'a Interaction,
    /// The relationship was dormant before this interaction revived it.
    pub revived: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipMetrics {
    pub weave_count: u32,
    pub deep_weaves: u32,
    pub week_streak: u32,
    pub birthday_weave: bool,
    pub anniversary_weave: bool,
    pub full_moon_weave: bool,
    pub revived: bool,
}

impl RelationshipMetrics {
    /// Derive metrics from a relationship's interactions (planned ones are
    /// ignored) and the optional triggering interaction.
    pub fn compute(
        relationship: &Relationship,
        interactions: &[Interaction],
        trigger: Option<Trigger<'_>>,
    ) -> Self {
        let completed: Vec<&Interaction> = interactions
            .iter()
            .filter(|i| i.attributes.is_completed())
            .collect();

        let matches_day = |day: Option<NaiveDate>| {
            day.is_some_and(|d| {
                completed.iter().any(|i| {
                    let date = i.attributes.date.date_naive();
                    date.month() == d.month() && date.day() == d.day()
                })
            })
        };

        Self {
            weave_count: completed.len() as u32,
            deep_weaves: completed.iter().filter(|i| i.attributes.is_deep()).count() as u32,
            week_streak: week_streak(completed.iter().map(|i| i.attributes.date.date_naive())),
            birthday_weave: matches_day(relationship.birthday),
            anniversary_weave: matches_day(relationship.anniversary),
            full_moon_weave: completed
                .iter()
                .any(|i| i.attributes.vibe == Some(Vibe::FullMoon)),
            revived: trigger.is_some_and(|t| t.revived && t.interaction.attributes.is_completed()),
        }
    }
}

impl MetricSource for RelationshipMetrics {
    fn metric(&self, category: BadgeCategory) -> Option<u32> {
        let flag = |b: bool| Some(u32::from(b));
        match category {
            BadgeCategory::WeaveCount => Some(self.weave_count),
            BadgeCategory::Depth => Some(self.deep_weaves),
            BadgeCategory::Consistency => Some(self.week_streak),
            BadgeCategory::FirstWeave => flag(self.weave_count > 0),
            BadgeCategory::Birthday => flag(self.birthday_weave),
            BadgeCategory::Anniversary => flag(self.anniversary_weave),
            BadgeCategory::FirstFullMoon => flag(self.full_moon_weave),
            BadgeCategory::Phoenix => flag(self.revived),
            _ => None,
        }
    }
}

/// Length of the run of consecutive ISO weeks ending at the latest date.
pub fn week_streak(dates: impl IntoIterator<Item = NaiveDate>) -> u32 {
    let weeks: BTreeSet<NaiveDate> = dates.into_iter().map(week_start).collect();
    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;
    for week in weeks.iter().rev() {
        match expected {
            Some(e) if *week != e => break,
            _ => {}
        }
        streak += 1;
        expected = Some(*week - Duration::days(7));
    }
    streak
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One relationship as seen by the global metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalEntry {
    pub tier: Tier,
    pub archetype: Archetype,
    /// Decayed score at evaluation time.
    pub current_score: f64,
    pub completed_interactions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalMetrics {
    pub total_weaves: u32,
    pub total_reflections: u32,
    pub active_inner: u32,
    pub archetype_diversity: u32,
    pub thriving_inner: bool,
}

impl GlobalMetrics {
    pub fn compute(entries: &[GlobalEntry], total_weaves: usize, total_reflections: usize) -> Self {
        let inner: Vec<&GlobalEntry> = entries.iter().filter(|e| e.tier == Tier::Inner).collect();
        let archetypes: HashSet<Archetype> = entries
            .iter()
            .filter(|e| e.completed_interactions > 0)
            .map(|e| e.archetype)
            .collect();

        Self {
            total_weaves: total_weaves as u32,
            total_reflections: total_reflections as u32,
            active_inner: inner
                .iter()
                .filter(|e| e.current_score >= ACTIVE_INNER_SCORE)
                .count() as u32,
            archetype_diversity: archetypes.len() as u32,
            thriving_inner: inner.len() >= THRIVING_INNER_MIN_MEMBERS
                && inner.iter().all(|e| e.current_score >= THRIVING_INNER_SCORE),
        }
    }
}

impl MetricSource for GlobalMetrics {
    fn metric(&self, category: BadgeCategory) -> Option<u32> {
        match category {
            BadgeCategory::TotalWeaves => Some(self.total_weaves),
            BadgeCategory::TotalReflections => Some(self.total_reflections),
            BadgeCategory::ActiveInnerCircle => Some(self.active_inner),
            BadgeCategory::ArchetypeDiversity => Some(self.archetype_diversity),
            BadgeCategory::ThrivingInnerCircle => Some(u32::from(self.thriving_inner)),
            _ => None,
        }
    }
}
